use clap::Parser;

/// Dining philosophers around a ring of spin-locked forks.
#[derive(Parser, Debug)]
#[command(name = "symposium", version)]
#[command(about = "Simulate N philosophers contending for N forks without deadlock", long_about = None)]
pub struct Args {
    /// Number of philosophers (at least 2)
    pub philosophers: usize,

    /// Simulation duration in seconds
    #[arg(default_value_t = 10)]
    pub duration: u64,

    /// TOML file with pacing, logging and seed settings
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for reproducible think/eat delays (overrides the config file)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not print live status lines
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_defaults_to_ten_seconds() {
        let args = Args::try_parse_from(["symposium", "5"]).unwrap();
        assert_eq!(args.philosophers, 5);
        assert_eq!(args.duration, 10);
        assert!(!args.json && !args.quiet);
    }

    #[test]
    fn flags_and_positionals() {
        let args =
            Args::try_parse_from(["symposium", "3", "2", "--seed", "9", "--json", "-q"]).unwrap();
        assert_eq!((args.philosophers, args.duration), (3, 2));
        assert_eq!(args.seed, Some(9));
        assert!(args.json && args.quiet);
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        assert!(Args::try_parse_from(["symposium", "five"]).is_err());
        assert!(Args::try_parse_from(["symposium"]).is_err());
        assert!(Args::try_parse_from(["symposium", "-3"]).is_err());
    }
}
