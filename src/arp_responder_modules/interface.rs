use pnet::datalink::{self, NetworkInterface};

use super::error::ResponderError;

pub fn lookup(name: &str) -> Result<NetworkInterface, ResponderError> {
    find_interface(name, &datalink::interfaces())
}

pub fn find_interface(
    name: &str,
    interfaces: &[NetworkInterface],
) -> Result<NetworkInterface, ResponderError> {
    interfaces
        .iter()
        .find(|iface| iface.name == name)
        .cloned()
        .ok_or_else(|| ResponderError::InterfaceNotFound(name.to_string()))
}
