use anyhow::Context;
use clap::Parser;
use dns_compress::{NameWriter, WriterConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dnc",
    about = "dnc - writes domain names into one DNS message using RFC1035 compression"
)]
struct Args {
    /// Placeholder bytes written before the first name.
    #[arg(long = "header-len", default_value_t = 12)]
    header_len: usize,
    #[arg(long = "max-len", short = 'm')]
    max_len: Option<usize>,
    /// Allow messages up to 65535 bytes.
    #[arg(long = "tcp")]
    tcp: bool,
    #[arg(long = "registry-capacity", short = 'r', default_value_t = 64)]
    registry_capacity: usize,
    #[arg(long = "no-compress")]
    no_compress: bool,
    #[arg(required = true)]
    names: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    for line in run(&args)? {
        println!("{}", line);
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

fn writer_config(args: &Args) -> WriterConfig {
    let mut config = if args.tcp {
        WriterConfig::tcp()
    } else {
        WriterConfig::new()
    };
    if let Some(max_len) = args.max_len {
        config = config.max_message_len(max_len);
    }
    config
        .registry_capacity(args.registry_capacity)
        .compression(!args.no_compress)
}

/// Writes every name and describes where each one ended up.
fn run(args: &Args) -> anyhow::Result<Vec<String>> {
    let mut writer = NameWriter::new(writer_config(args));
    writer
        .append_slice(&vec![0u8; args.header_len])
        .context("header does not fit in the message")?;

    let mut lines = Vec::with_capacity(args.names.len() + 1);
    for name in args.names.iter() {
        let offset = writer.len();
        let len = writer
            .append_name(name)
            .with_context(|| format!("could not write {:?}", name))?;
        info!("{} at {} in {} bytes", name, offset, len);

        lines.push(format!(
            "{:>5} {:>3}  {}  {}",
            offset,
            len,
            hex(&writer.as_slice()[offset..]),
            name
        ));
    }
    lines.push(format!("total {} bytes", writer.len()));

    Ok(lines)
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
