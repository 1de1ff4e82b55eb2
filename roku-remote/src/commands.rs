//! Command execution
//!
//! Each command resolves the device address (from cache or discovery) and
//! issues its ECP request. Output goes to the writer passed in so commands
//! can be exercised without a terminal.

use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use ecp_client::EcpClient;
use roku_resolver::{Clock, DeviceLocator, DeviceResolver};
use tracing::debug;

use crate::cli::Command;

pub struct Executor<'a, L, C> {
    resolver: &'a DeviceResolver<L, C>,
    ecp: &'a EcpClient,
    device: Option<&'a str>,
}

impl<'a, L: DeviceLocator, C: Clock> Executor<'a, L, C> {
    pub fn new(resolver: &'a DeviceResolver<L, C>, ecp: &'a EcpClient, device: Option<&'a str>) -> Self {
        Self {
            resolver,
            ecp,
            device,
        }
    }

    fn address(&self) -> Result<String> {
        let address = match self.device {
            Some(name) => self.resolver.resolve_named(name)?,
            None => self.resolver.resolve_address()?,
        };
        debug!(%address, "resolved device");
        Ok(address)
    }

    pub fn execute(&self, command: &Command, out: &mut impl Write) -> Result<()> {
        if let (Some(name), Some(subcommand)) = (self.device, command.cache_only_name()) {
            bail!("--device {:?} cannot be used with `{}`", name, subcommand);
        }

        match command {
            Command::Discover => {
                let record = self.resolver.refresh()?;
                for device in &record.devices {
                    write!(out, "Found roku at {}", device.address)?;
                    if !device.name.is_empty() {
                        write!(out, " named {}", device.name)?;
                    }
                    writeln!(out)?;
                }
            }
            Command::List => {
                for device in self.resolver.known_devices()? {
                    if device.name.is_empty() {
                        writeln!(out, "{}", device.address)?;
                    } else {
                        writeln!(out, "{}: {}", device.name, device.address)?;
                    }
                }
            }
            Command::Use { name } => {
                let device = self.resolver.use_device(name)?;
                writeln!(out, "Using Roku named {} at {}", device.name, device.address)?;
            }
            Command::DeviceInfo => {
                let address = self.address()?;
                let info = self
                    .ecp
                    .query_device_info(&address)
                    .context("failed to query device info")?;
                if let Some(name) = info.display_name() {
                    writeln!(out, "Name:\t\t{}", name)?;
                }
                writeln!(out, "Model:\t\t{} {}", info.model_name, info.model_number)?;
                writeln!(out, "Serial:\t\t{}", info.serial_number)?;
            }
            Command::Text { text } => {
                let address = self.address()?;
                self.ecp
                    .send_text(&address, text)
                    .context("failed to send text")?;
            }
            Command::Apps => {
                let address = self.address()?;
                let apps = self.ecp.query_apps(&address).context("failed to list apps")?;
                for app in apps {
                    writeln!(out, "{}", app.name)?;
                }
            }
            Command::App { name } => {
                let address = self.address()?;
                let apps = self.ecp.query_apps(&address).context("failed to list apps")?;
                let app = apps
                    .iter()
                    .find(|app| &app.name == name)
                    .ok_or_else(|| anyhow!("App {:?} not found", name))?;
                self.ecp
                    .launch(&address, &app.id)
                    .with_context(|| format!("failed to launch {}", app.name))?;
            }
            Command::Forget => {
                self.resolver
                    .forget()
                    .with_context(|| format!("failed to remove {}", self.resolver.cache().path().display()))?;
                writeln!(out, "Forgot cached device")?;
            }
            keypress => {
                let key = keypress
                    .key()
                    .ok_or_else(|| anyhow!("no remote key bound to {:?}", keypress))?;
                let address = self.address()?;
                self.ecp
                    .keypress(&address, key)
                    .with_context(|| format!("failed to send {} to {}", key, address))?;
            }
        }

        Ok(())
    }
}
