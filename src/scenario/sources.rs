use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NewsSourceKind {
    Mock,
    Supabase,
}

impl fmt::Display for NewsSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
            Self::Supabase => write!(f, "supabase"),
        }
    }
}

impl FromStr for NewsSourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mock" | "demo" => Ok(Self::Mock),
            "supabase" | "remote" => Ok(Self::Supabase),
            other => Err(anyhow!("unknown news source kind: {other}")),
        }
    }
}
