//! Utility command handlers.

use gmk67_transport::HidDiscovery;

use super::Context;

/// List connected keyboards matching the stock or configured IDs
pub fn list(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let mut discovery = HidDiscovery::new();
    discovery.add_device(ctx.config.vid, ctx.config.pid);
    let devices = discovery.list_devices()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("No GMK67 keyboards found");
        return Ok(());
    }
    for device in &devices {
        let info = &device.info;
        println!(
            "  VID={:04x} PID={:04x} if={} {} path={}",
            info.vid,
            info.pid,
            info.interface_number,
            info.product_name.as_deref().unwrap_or("?"),
            info.device_path,
        );
    }
    Ok(())
}
