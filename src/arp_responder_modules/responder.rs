//! The request -> reply decision and the capture loop driving it.
use log::{debug, info, trace, warn};
use pnet::packet::ethernet::EtherTypes;

use super::error::ResponderError;
use super::events::{EventSink, ReplyEvent};
use super::frame::{ArpMessage, CapturedFrame, EthernetHeader, Operation, ReplyFrame};
use super::identity::Identity;
use super::shutdown::Shutdown;
use super::source::{FrameSource, FrameTransmitter, NextFrame};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub frames: u64,
    pub replies: u64,
    pub dropped: u64,
    pub errors: u64,
}

pub struct Responder {
    identity: Identity,
}

impl Responder {
    pub fn new(identity: Identity) -> Responder {
        Responder { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the reply to send for `frame`, or `None` when it is not a request for our address.
    pub fn process_frame(&self, frame: &CapturedFrame) -> Option<ReplyFrame> {
        let request = frame.arp?;
        if request.operation != Operation::Request {
            return None;
        }
        if request.target_proto_addr != self.identity.target_ip() {
            return None;
        }

        info!(
            "ARP request: {} -> {}",
            request.sender_proto_addr, request.target_proto_addr
        );

        let hw_addr = self.identity.hw_addr();
        Some(ReplyFrame {
            ethernet: EthernetHeader {
                source: hw_addr,
                destination: request.sender_hw_addr,
                ethertype: EtherTypes::Arp,
            },
            arp: ArpMessage {
                operation: Operation::Reply,
                sender_hw_addr: hw_addr,
                sender_proto_addr: request.target_proto_addr,
                target_hw_addr: request.sender_hw_addr,
                target_proto_addr: request.sender_proto_addr,
            },
        })
    }

    /// Runs until the source is exhausted or a stop is requested. Per-frame errors never end it.
    pub fn run<S, T>(
        &self,
        source: &mut S,
        transmitter: &mut T,
        shutdown: &Shutdown,
        events: &mut dyn EventSink,
    ) -> Stats
    where
        S: FrameSource + ?Sized,
        T: FrameTransmitter + ?Sized,
    {
        let mut stats = Stats::default();

        while !shutdown.requested() {
            let bytes = match source.next_frame() {
                Ok(NextFrame::Frame(bytes)) => bytes,
                Ok(NextFrame::Idle) => continue,
                Ok(NextFrame::EndOfStream) => break,
                Err(e) => {
                    warn!("Packet receive error: {}", e);
                    stats.errors += 1;
                    continue;
                }
            };
            stats.frames += 1;

            let reply = match CapturedFrame::decode(bytes) {
                Some(frame) => match self.process_frame(&frame) {
                    Some(reply) => reply,
                    None => {
                        trace!(
                            "dropped {:?} frame: {:02x?}",
                            frame.ethernet.ethertype,
                            frame.bytes
                        );
                        stats.dropped += 1;
                        continue;
                    }
                },
                None => {
                    trace!("dropped runt frame ({} bytes)", bytes.len());
                    stats.dropped += 1;
                    continue;
                }
            };

            match self.send_reply(&reply, transmitter) {
                Ok(wire) => {
                    stats.replies += 1;
                    debug!("sent reply to {}", reply.arp.target_hw_addr);
                    let event = ReplyEvent {
                        sender_ip: reply.arp.target_proto_addr,
                        sender_mac: reply.arp.target_hw_addr,
                        target_ip: reply.arp.sender_proto_addr,
                        reply_mac: reply.arp.sender_hw_addr,
                        frame: &wire,
                    };
                    if let Err(e) = events.reply_sent(&event) {
                        warn!("Event log error: {}", e);
                    }
                }
                Err(e) => {
                    warn!("{} (request from {})", e, reply.arp.target_proto_addr);
                    stats.errors += 1;
                }
            }
        }

        stats
    }

    fn send_reply<T>(
        &self,
        reply: &ReplyFrame,
        transmitter: &mut T,
    ) -> Result<Vec<u8>, ResponderError>
    where
        T: FrameTransmitter + ?Sized,
    {
        let wire = reply.serialize()?;
        trace!("reply bytes: {:02x?}", wire);
        transmitter.transmit(&wire).map_err(ResponderError::Transmit)?;
        Ok(wire)
    }
}
