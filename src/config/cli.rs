use crate::domain::model::{ParamValue, Params};
use crate::utils::error::{Result, VenuesError};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "venues")]
#[command(about = "Query the venues endpoints of the Foursquare API")]
pub struct CliConfig {
    #[arg(long, short, default_value = "venues.toml")]
    pub config: String,

    #[arg(long, help = "Access token of the acting user (overrides the config file)")]
    pub token: Option<String>,

    #[arg(long = "param", short = 'p', value_name = "KEY=VALUE", help = "Extra query parameter, repeatable")]
    pub params: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the venue category tree
    Categories,
    /// Recommended venues near a point
    Explore(Location),
    /// Venues matching a query near a point
    Search(Location),
    /// Venues with the most people checked in right now
    Trending(Location),
    /// Full details for one venue
    Venue { venue_id: String },
    /// Any named aspect of a venue
    Aspect { venue_id: String, aspect: String },
    /// Who is checked in at a venue
    HereNow { venue_id: String },
    Tips { venue_id: String },
    Photos {
        venue_id: String,
        #[arg(long)]
        group: Option<String>,
    },
    Links { venue_id: String },
}

#[derive(Debug, Clone, clap::Args)]
pub struct Location {
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: String,
}

impl CliConfig {
    /// Parses every `--param key=value` into a parameter bag. Integers and
    /// booleans keep their type; everything else is sent as text.
    pub fn param_bag(&self) -> Result<Option<Params>> {
        if self.params.is_empty() {
            return Ok(None);
        }

        let mut bag = Params::new();
        for raw in &self.params {
            let (key, value) = raw.split_once('=').ok_or_else(|| {
                VenuesError::validation(format!("--param expects KEY=VALUE, got '{}'", raw))
            })?;
            if key.trim().is_empty() {
                return Err(VenuesError::validation(format!(
                    "--param has an empty key: '{}'",
                    raw
                )));
            }
            bag.insert(key.trim().to_string(), parse_param_value(value));
        }
        Ok(Some(bag))
    }
}

fn parse_param_value(value: &str) -> ParamValue {
    if let Ok(v) = value.parse::<i64>() {
        return ParamValue::Integer(v);
    }
    match value {
        "true" => ParamValue::Bool(true),
        "false" => ParamValue::Bool(false),
        other => ParamValue::Text(other.to_string()),
    }
}
