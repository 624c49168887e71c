//! Live capture and transmission on a pnet datalink channel.
use log::trace;
use pnet::datalink::{self, Channel, ChannelType, Config, NetworkInterface};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use std::io;
use std::time::Duration;

use super::error::ResponderError;
use super::source::{FrameSource, FrameTransmitter, NextFrame};

pub const DEFAULT_SNAP_LEN: usize = 1500;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Clone, Copy)]
pub struct CaptureOptions {
    pub snap_len: usize,
    /// Upper bound on a blocking read, so the loop can notice a shutdown request.
    pub poll_interval: Duration,
    pub write_timeout: Duration,
}

impl CaptureOptions {
    fn datalink_config(&self) -> Config {
        Config {
            write_buffer_size: self.snap_len,
            read_buffer_size: self.snap_len,
            read_timeout: Some(self.poll_interval),
            write_timeout: Some(self.write_timeout),
            channel_type: ChannelType::Layer2,
            promiscuous: false,
            ..Default::default()
        }
    }
}

pub struct LiveSource {
    receiver: Box<dyn datalink::DataLinkReceiver>,
}

pub struct LiveTransmitter {
    sender: Box<dyn datalink::DataLinkSender>,
}

pub fn open(
    interface: &NetworkInterface,
    options: &CaptureOptions,
) -> Result<(LiveSource, LiveTransmitter), ResponderError> {
    match datalink::channel(interface, options.datalink_config()) {
        Ok(Channel::Ethernet(sender, receiver)) => {
            Ok((LiveSource { receiver }, LiveTransmitter { sender }))
        }
        Ok(_) => Err(ResponderError::UnsupportedChannel(interface.name.clone())),
        Err(e) => Err(ResponderError::CaptureOpen(interface.name.clone(), e)),
    }
}

/// Userspace equivalent of the "arp" capture filter.
fn is_arp(frame: &[u8]) -> bool {
    EthernetPacket::new(frame)
        .map(|eth| eth.get_ethertype() == EtherTypes::Arp)
        .unwrap_or(false)
}

impl FrameSource for LiveSource {
    fn next_frame(&mut self) -> io::Result<NextFrame<'_>> {
        match self.receiver.next() {
            Ok(frame) if is_arp(frame) => Ok(NextFrame::Frame(frame)),
            Ok(frame) => {
                trace!("filtered non-ARP frame ({} bytes)", frame.len());
                Ok(NextFrame::Idle)
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(NextFrame::Idle),
            Err(e) => Err(e),
        }
    }
}

impl FrameTransmitter for LiveTransmitter {
    fn transmit(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self.sender.send_to(bytes, None) {
            Some(result) => result,
            None => Err(io::Error::new(
                io::ErrorKind::Other,
                "datalink sender refused the frame",
            )),
        }
    }
}
