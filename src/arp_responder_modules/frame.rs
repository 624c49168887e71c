//! Ethernet/ARP frame decoding and the reply wire layout.
use pnet::packet::arp::{
    ArpHardwareTypes, ArpOperation, ArpOperations, ArpPacket, MutableArpPacket,
};
use pnet::packet::ethernet::{EtherType, EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::packet::{MutablePacket, Packet};
use pnet::util::MacAddr;
use std::net::Ipv4Addr;

use super::error::ResponderError;

pub const ETHERNET_HEADER_LEN: usize = 14;
pub const ARP_BODY_LEN: usize = 28;
pub const REPLY_FRAME_LEN: usize = ETHERNET_HEADER_LEN + ARP_BODY_LEN;
/// Shortest frame on the wire (without FCS); shorter replies are zero padded.
pub const ETHERNET_MIN_FRAME_LEN: usize = 60;

const ETHERNET_HW_ADDR_LEN: u8 = 6;
const IPV4_PROTO_ADDR_LEN: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Request,
    Reply,
    Other(u16),
}

impl From<ArpOperation> for Operation {
    fn from(op: ArpOperation) -> Operation {
        match op {
            ArpOperations::Request => Operation::Request,
            ArpOperations::Reply => Operation::Reply,
            ArpOperation(other) => Operation::Other(other),
        }
    }
}

impl From<Operation> for ArpOperation {
    fn from(op: Operation) -> ArpOperation {
        match op {
            Operation::Request => ArpOperations::Request,
            Operation::Reply => ArpOperations::Reply,
            Operation::Other(other) => ArpOperation(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    pub source: MacAddr,
    pub destination: MacAddr,
    pub ethertype: EtherType,
}

/// An Ethernet/IPv4 ARP message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpMessage {
    pub operation: Operation,
    pub sender_hw_addr: MacAddr,
    pub sender_proto_addr: Ipv4Addr,
    pub target_hw_addr: MacAddr,
    pub target_proto_addr: Ipv4Addr,
}

impl ArpMessage {
    fn decode(body: &[u8]) -> Option<ArpMessage> {
        let arp = ArpPacket::new(body)?;
        if arp.get_hardware_type() != ArpHardwareTypes::Ethernet
            || arp.get_protocol_type() != EtherTypes::Ipv4
            || arp.get_hw_addr_len() != ETHERNET_HW_ADDR_LEN
            || arp.get_proto_addr_len() != IPV4_PROTO_ADDR_LEN
        {
            return None;
        }
        Some(ArpMessage {
            operation: arp.get_operation().into(),
            sender_hw_addr: arp.get_sender_hw_addr(),
            sender_proto_addr: arp.get_sender_proto_addr(),
            target_hw_addr: arp.get_target_hw_addr(),
            target_proto_addr: arp.get_target_proto_addr(),
        })
    }
}

/// One frame as delivered by the capture source. It is read-only and only lives for one pass.
#[derive(Debug)]
pub struct CapturedFrame<'a> {
    pub bytes: &'a [u8],
    pub ethernet: EthernetHeader,
    pub arp: Option<ArpMessage>,
}

impl<'a> CapturedFrame<'a> {
    /// `None` only when the bytes do not even hold an Ethernet header.
    pub fn decode(bytes: &'a [u8]) -> Option<CapturedFrame<'a>> {
        let eth = EthernetPacket::new(bytes)?;
        let ethernet = EthernetHeader {
            source: eth.get_source(),
            destination: eth.get_destination(),
            ethertype: eth.get_ethertype(),
        };
        let arp = if ethernet.ethertype == EtherTypes::Arp {
            ArpMessage::decode(eth.payload())
        } else {
            None
        };
        Some(CapturedFrame {
            bytes,
            ethernet,
            arp,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyFrame {
    pub ethernet: EthernetHeader,
    pub arp: ArpMessage,
}

impl ReplyFrame {
    pub fn serialize(&self) -> Result<Vec<u8>, ResponderError> {
        let mut buffer = vec![0u8; REPLY_FRAME_LEN.max(ETHERNET_MIN_FRAME_LEN)];
        let mut eth = MutableEthernetPacket::new(&mut buffer)
            .ok_or(ResponderError::Serialize("buffer too small for Ethernet header"))?;
        eth.set_destination(self.ethernet.destination);
        eth.set_source(self.ethernet.source);
        eth.set_ethertype(self.ethernet.ethertype);

        let mut arp = MutableArpPacket::new(eth.payload_mut())
            .ok_or(ResponderError::Serialize("buffer too small for ARP body"))?;
        arp.set_hardware_type(ArpHardwareTypes::Ethernet);
        arp.set_protocol_type(EtherTypes::Ipv4);
        arp.set_hw_addr_len(ETHERNET_HW_ADDR_LEN);
        arp.set_proto_addr_len(IPV4_PROTO_ADDR_LEN);
        arp.set_operation(self.arp.operation.into());
        arp.set_sender_hw_addr(self.arp.sender_hw_addr);
        arp.set_sender_proto_addr(self.arp.sender_proto_addr);
        arp.set_target_hw_addr(self.arp.target_hw_addr);
        arp.set_target_proto_addr(self.arp.target_proto_addr);

        Ok(buffer)
    }
}

/// Builds a raw Ethernet/ARP frame. Shared by the test modules.
#[cfg(test)]
pub fn build_arp_frame(
    operation: ArpOperation,
    sender_mac: MacAddr,
    sender_ip: Ipv4Addr,
    target_ip: Ipv4Addr,
) -> Vec<u8> {
    let mut buffer = vec![0u8; REPLY_FRAME_LEN];
    let mut eth = MutableEthernetPacket::new(&mut buffer).unwrap();
    eth.set_destination(MacAddr::broadcast());
    eth.set_source(sender_mac);
    eth.set_ethertype(EtherTypes::Arp);

    let mut arp = MutableArpPacket::new(eth.payload_mut()).unwrap();
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(operation);
    arp.set_sender_hw_addr(sender_mac);
    arp.set_sender_proto_addr(sender_ip);
    arp.set_target_hw_addr(MacAddr::zero());
    arp.set_target_proto_addr(target_ip);
    buffer
}
