// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! MiniJava compiler command-line interface.
//!
//! This is the main entry point for the `minijava` command.

use clap::{Parser, Subcommand};
use miette::Result;
use minijava_core::compile::CompilerOptions;

mod commands;
mod diagnostic;

/// MiniJava: a compiler front end for a small Java-like language
#[derive(Debug, Parser)]
#[command(name = "minijava")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a source file for errors
    Check {
        /// Source file to check
        path: String,

        /// Echo the token stream as it is produced
        #[arg(long)]
        dump_tokens: bool,

        /// Print the class table after the first elaboration pass
        #[arg(long)]
        dump_class_table: bool,

        /// Print each method's symbol table during the second pass
        #[arg(long)]
        dump_method_tables: bool,
    },

    /// Parse a source file and pretty-print it to stdout
    Fmt {
        /// Source file to format
        path: String,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check {
            path,
            dump_tokens,
            dump_class_table,
            dump_method_tables,
        } => {
            let options = CompilerOptions {
                dump_tokens,
                dump_class_table,
                dump_method_tables,
            };
            commands::check::check(&path, &options)
        }
        Command::Fmt { path } => commands::fmt::fmt(&path),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
