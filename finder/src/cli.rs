use clap::{Parser, ValueEnum};
use stacks::{CloudFormationConfig, Delimiter, FinderSettings, Position, DEFAULT_REGION};

#[derive(Parser, Debug)]
#[command(name = "aws-expired-stack-finder", version)]
#[command(
    about = "Finds AWS CloudFormation stacks sharing a common environment suffix or prefix that are considered expired"
)]
pub struct Cli {
    /// Where in the stack name to search for the environment identifier
    #[arg(short = 'p', long, value_enum, default_value_t = PositionArg::Prefix)]
    pub positional: PositionArg,

    /// Delimiter used to split stack names, e.g. "dev-file-upload-api" or "dev_file_upload_api"
    #[arg(short = 'd', long, value_enum, default_value_t = DelimiterArg::Hyphen)]
    pub delimiter: DelimiterArg,

    /// Days since a stack was last updated before it is considered expired
    #[arg(long, default_value_t = stacks::DEFAULT_EXPIRY_DAYS, allow_negative_numbers = true)]
    pub expiry: i64,

    /// Environment identifiers to leave out of the report, e.g. master dev test
    #[arg(short = 'e', long, num_args = 0..)]
    pub exclude: Vec<String>,

    /// AWS region to search for stacks
    #[arg(short = 'r', long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// AWS profile(s) to list stacks with
    #[arg(long, num_args = 0..)]
    pub profile: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionArg {
    Prefix,
    #[value(name = "sufix", alias = "suffix")]
    Suffix,
}

impl From<PositionArg> for Position {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Prefix => Position::Prefix,
            PositionArg::Suffix => Position::Suffix,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelimiterArg {
    #[value(name = "_")]
    Underscore,
    #[value(name = "-")]
    Hyphen,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Underscore => Delimiter::Underscore,
            DelimiterArg::Hyphen => Delimiter::Hyphen,
        }
    }
}

impl Cli {
    pub fn settings(&self) -> FinderSettings {
        FinderSettings::new()
            .with_expiry_days(self.expiry)
            .with_position(self.positional.into())
            .with_delimiter(self.delimiter.into())
            .with_excluded(self.exclude.iter().cloned())
    }

    /// One provider configuration per requested profile, or a single one
    /// using the default credential chain.
    pub fn provider_configs(&self) -> Vec<CloudFormationConfig> {
        let base = CloudFormationConfig::new().with_region(self.region.clone());
        if self.profile.is_empty() {
            return vec![base];
        }

        self.profile
            .iter()
            .map(|profile| base.clone().with_profile(profile.clone()))
            .collect()
    }
}
