use pnet::datalink::NetworkInterface;
use pnet::util::MacAddr;
use std::net::Ipv4Addr;

use super::error::ResponderError;

/// The protocol address we answer for and the hardware address we claim for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    target_ip: Ipv4Addr,
    hw_addr: MacAddr,
}

impl Identity {
    pub fn new(target_ip: Ipv4Addr, hw_addr: MacAddr) -> Result<Identity, ResponderError> {
        if target_ip.is_unspecified() {
            return Err(ResponderError::InvalidIdentity(
                "target address must not be 0.0.0.0",
            ));
        }
        if hw_addr.is_zero() {
            return Err(ResponderError::InvalidIdentity(
                "hardware address must not be all zeros",
            ));
        }
        if hw_addr.is_multicast() {
            return Err(ResponderError::InvalidIdentity("hardware address must be unicast"));
        }
        Ok(Identity { target_ip, hw_addr })
    }

    /// Resolves the startup options. Without an explicit MAC the interface's own one is used.
    pub fn parse(
        address: &str,
        mac: Option<&str>,
        interface: &NetworkInterface,
    ) -> Result<Identity, ResponderError> {
        let trimmed = address.trim();
        let target_ip: Ipv4Addr = trimmed
            .parse()
            .map_err(|_| ResponderError::InvalidIpAddress(trimmed.to_string()))?;

        let hw_addr = match mac {
            Some(mac) => {
                let mac = mac.trim();
                mac.parse::<MacAddr>()
                    .map_err(|_| ResponderError::InvalidMacAddress(mac.to_string()))?
            }
            None => interface
                .mac
                .ok_or_else(|| ResponderError::NoHardwareAddress(interface.name.clone()))?,
        };

        Identity::new(target_ip, hw_addr)
    }

    pub fn target_ip(&self) -> Ipv4Addr {
        self.target_ip
    }

    pub fn hw_addr(&self) -> MacAddr {
        self.hw_addr
    }
}
