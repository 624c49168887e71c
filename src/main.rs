mod arp_responder_modules;

use anyhow::Context as _;
use clap::Parser;
use log::info;

pub use crate::arp_responder_modules::capture;
pub use crate::arp_responder_modules::cli::Args;
pub use crate::arp_responder_modules::events::{EventSink, JsonEventLog, NoEvents};
pub use crate::arp_responder_modules::identity::Identity;
pub use crate::arp_responder_modules::interface;
pub use crate::arp_responder_modules::responder::Responder;
pub use crate::arp_responder_modules::shutdown::Shutdown;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let iface = interface::lookup(&args.interface)?;
    let identity = Identity::parse(&args.address, args.mac.as_deref(), &iface)?;

    let (mut source, mut transmitter) = capture::open(&iface, &args.capture_options())
        .context("Verify that you are in ROOT mode")?;

    let mut events: Box<dyn EventSink> = match &args.events {
        Some(path) => Box::new(
            JsonEventLog::append(path)
                .with_context(|| format!("can't open event log {}", path.display()))?,
        ),
        None => Box::new(NoEvents),
    };

    let shutdown = Shutdown::on_ctrl_c().context("Error setting Ctrl-C handler")?;

    info!(
        "Interface: {} macaddr={}",
        iface.name,
        identity.hw_addr()
    );

    let responder = Responder::new(identity);
    let stats = responder.run(&mut source, &mut transmitter, &shutdown, events.as_mut());

    info!(
        "Stopped answering for {}: {} frames, {} replies, {} dropped, {} errors",
        responder.identity().target_ip(),
        stats.frames,
        stats.replies,
        stats.dropped,
        stats.errors
    );
    Ok(())
}
