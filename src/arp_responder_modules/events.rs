//! Structured record of every answered request, one JSON object per line.
use pnet::util::MacAddr;
use serde_json::json;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub struct ReplyEvent<'a> {
    pub sender_ip: Ipv4Addr,
    pub sender_mac: MacAddr,
    pub target_ip: Ipv4Addr,
    pub reply_mac: MacAddr,
    pub frame: &'a [u8],
}

pub trait EventSink {
    fn reply_sent(&mut self, event: &ReplyEvent) -> io::Result<()>;
}

pub struct NoEvents;

impl EventSink for NoEvents {
    fn reply_sent(&mut self, _event: &ReplyEvent) -> io::Result<()> {
        Ok(())
    }
}

pub struct JsonEventLog<W: Write> {
    out: W,
}

impl JsonEventLog<File> {
    pub fn append<P: AsRef<Path>>(path: P) -> io::Result<JsonEventLog<File>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(JsonEventLog::new(file))
    }
}

impl<W: Write> JsonEventLog<W> {
    pub fn new(out: W) -> JsonEventLog<W> {
        JsonEventLog { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for JsonEventLog<W> {
    fn reply_sent(&mut self, event: &ReplyEvent) -> io::Result<()> {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let record = json!({
            "timestamp": timestamp,
            "sender_ip": event.sender_ip.to_string(),
            "sender_mac": event.sender_mac.to_string(),
            "target_ip": event.target_ip.to_string(),
            "reply_mac": event.reply_mac.to_string(),
            "frame": hex::encode(event.frame),
        });
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn event(frame: &[u8]) -> ReplyEvent<'_> {
        ReplyEvent {
            sender_ip: Ipv4Addr::new(10, 0, 0, 9),
            sender_mac: MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x55),
            target_ip: Ipv4Addr::new(10, 0, 0, 5),
            reply_mac: MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff),
            frame,
        }
    }

    #[test]
    fn writes_one_object_per_line() {
        let mut log = JsonEventLog::new(Vec::new());
        log.reply_sent(&event(&[0x08, 0x06])).unwrap();
        log.reply_sent(&event(&[0xff])).unwrap();

        let text = String::from_utf8(log.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["sender_ip"], "10.0.0.9");
        assert_eq!(first["sender_mac"], "00:11:22:33:44:55");
        assert_eq!(first["target_ip"], "10.0.0.5");
        assert_eq!(first["reply_mac"], "aa:bb:cc:dd:ee:ff");
        assert_eq!(first["frame"], "0806");
        assert!(first["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn append_creates_missing_directories() {
        let dir = std::env::temp_dir()
            .join(format!("arp_responder_events_{}", std::process::id()))
            .join("nested");
        let path = dir.join("events.jsonl");
        {
            let mut log = JsonEventLog::append(&path).unwrap();
            log.reply_sent(&event(&[1])).unwrap();
        }
        {
            let mut log = JsonEventLog::append(&path).unwrap();
            log.reply_sent(&event(&[2])).unwrap();
        }
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }
}
