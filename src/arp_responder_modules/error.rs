use std::error;
use std::fmt;
use std::fmt::Formatter;
use std::io;

#[derive(Debug)]
pub enum ResponderError {
    InvalidIpAddress(String),
    InvalidMacAddress(String),
    InterfaceNotFound(String),
    NoHardwareAddress(String),
    InvalidIdentity(&'static str),
    CaptureOpen(String, io::Error),
    UnsupportedChannel(String),
    Serialize(&'static str),
    Transmit(io::Error),
}

impl fmt::Display for ResponderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ResponderError::InvalidIpAddress(addr) => write!(f, "Invalid IP address: {}", addr),
            ResponderError::InvalidMacAddress(mac) => write!(f, "Invalid MAC address: {}", mac),
            ResponderError::InterfaceNotFound(name) => write!(f, "Interface not found: {}", name),
            ResponderError::NoHardwareAddress(name) => {
                write!(f, "Interface {} has no hardware address", name)
            }
            ResponderError::InvalidIdentity(reason) => write!(f, "Invalid identity: {}", reason),
            ResponderError::CaptureOpen(name, e) => {
                write!(f, "Failed to open capture on {}: {}", name, e)
            }
            ResponderError::UnsupportedChannel(name) => {
                write!(f, "Interface {} does not provide an Ethernet channel", name)
            }
            ResponderError::Serialize(reason) => write!(f, "Failed to serialize reply: {}", reason),
            ResponderError::Transmit(e) => write!(f, "Failed to send reply: {}", e),
        }
    }
}

impl error::Error for ResponderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ResponderError::CaptureOpen(_, e) | ResponderError::Transmit(e) => Some(e),
            _ => None,
        }
    }
}
