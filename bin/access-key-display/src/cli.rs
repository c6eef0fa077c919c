use clap::Parser;

use access_key_auth::Timestamp;
use access_key_config::QueryParams;

/// Show the rotating access key as a QR code in the terminal.
#[derive(Debug, Parser)]
#[command(name = "access-key-display", version, about)]
pub struct Cli {
    /// Shareable link or bare query string carrying key/checol/offset
    #[arg(long)]
    pub link: Option<String>,

    /// Secret key, hex encoded
    #[arg(long)]
    pub key: Option<String>,

    /// Site tag mixed into the checksum
    #[arg(long)]
    pub checol: Option<String>,

    /// Seconds subtracted from the clock before windowing
    #[arg(long)]
    pub offset: Option<String>,

    /// LevelDB directory holding the persisted configuration
    #[arg(long)]
    pub store: Option<String>,

    /// Generate for this unix timestamp instead of the wall clock
    #[arg(long)]
    pub at: Option<Timestamp>,

    /// Print a single code and exit
    #[arg(long, conflicts_with = "ticks")]
    pub once: bool,

    /// Stop after this many one-second ticks
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub ticks: Option<u64>,

    /// Print the hex code only
    #[arg(long)]
    pub no_qr: bool,
}

impl Cli {
    /// The link layer with individual flags on top.
    pub fn query_params(&self) -> QueryParams {
        let link = self.link
            .as_deref()
            .map(QueryParams::from_link)
            .unwrap_or_default();

        link.merge(QueryParams {
            key: self.key.clone(),
            checol: self.checol.clone(),
            offset: self.offset.clone(),
        })
    }

    pub fn tick_limit(&self) -> Option<u64> {
        if self.once { Some(1) } else { self.ticks }
    }
}

#[cfg(test)]
mod test {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn flags_override_link() {
        let cli = Cli::try_parse_from([
            "access-key-display",
            "--link", "https://door.local/?key=aa&checol=lobby",
            "--key", "bb",
        ]).unwrap();

        let params = cli.query_params();
        assert_eq!(params.key.as_deref(), Some("bb"));
        assert_eq!(params.checol.as_deref(), Some("lobby"));
        assert_eq!(params.offset, None);
    }

    #[test]
    fn no_flags_is_empty_query() {
        let cli = Cli::try_parse_from(["access-key-display"]).unwrap();
        assert!(cli.query_params().is_empty());
        assert_eq!(cli.tick_limit(), None);
    }

    #[test]
    fn once_means_single_tick() {
        let cli = Cli::try_parse_from(["access-key-display", "--once", "--at", "1000000000"]).unwrap();
        assert_eq!(cli.tick_limit(), Some(1));
        assert_eq!(cli.at, Some(1_000_000_000));

        assert!(Cli::try_parse_from(["access-key-display", "--once", "--ticks", "3"]).is_err());
        assert!(Cli::try_parse_from(["access-key-display", "--ticks", "0"]).is_err());
    }
}
