//! CLI argument structures
//!
//! This module defines the command-line interface of the `underbar` binary. Every
//! subcommand reads one JSON document and prints one JSON result.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Apply collection operations to JSON documents
#[derive(Parser, Debug)]
#[command(name = "underbar")]
#[command(about = "underbar - Functional collection operations over JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON input (read from stdin when omitted)
    #[arg(short = 'i', long, global = true, value_name = "JSON")]
    pub input: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Remove duplicate elements from an array
    Uniq {
        /// Treat the input as sorted and only compare neighbours
        #[arg(long)]
        sorted: bool,
    },

    /// Extract one property from every element
    Pluck {
        /// Property name
        key: String,
    },

    /// First element, or the first N elements
    First {
        #[arg(short = 'n', long)]
        n: Option<usize>,
    },

    /// Last element, or the last N elements
    Last {
        #[arg(short = 'n', long)]
        n: Option<usize>,
    },

    /// Index of the first element equal to TARGET (null when absent)
    #[command(name = "index-of")]
    IndexOf {
        /// JSON value to look for; bare words are treated as strings
        target: String,
    },

    /// Whether any element equals TARGET
    Contains {
        /// JSON value to look for; bare words are treated as strings
        target: String,
    },

    /// Whether every element is truthy
    Every,

    /// Whether at least one element is truthy
    #[command(name = "some")]
    Any,

    /// Flatten nested arrays
    Flatten,

    /// Zip an array of arrays by index
    Zip,

    /// Elements of the first array present in all arrays
    Intersection,

    /// Elements of the first array present in none of the others
    Difference,

    /// Sort an array by a numeric property
    #[command(name = "sort-by")]
    SortBy {
        /// Property name
        property: String,
    },

    /// Randomly reorder an array
    Shuffle {
        /// Seed for a reproducible order (overrides the configured seed)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Call a named method on every element
    Invoke {
        /// Method name (to_uppercase, to_lowercase, trim, len, reverse, sort, keys, values, join, to_string)
        method: String,

        /// JSON array of method arguments
        #[arg(long, value_name = "JSON")]
        args: Option<String>,
    },

    /// Merge an array of objects into the first, later objects winning
    Extend,

    /// Merge an array of objects into the first without overwriting
    Defaults,

    /// Sum the numbers of an array or object
    Sum,
}
