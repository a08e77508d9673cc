use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tablepack")]
#[command(version)]
#[command(about = "Assemble pinball table packages from organization templates", long_about = None)]
#[command(after_help = "Examples:\n  \
  tablepack templates                                   list built-in templates\n  \
  tablepack preview -T pinup-popper -t 'My Game.vpx'     show the package layout\n  \
  tablepack build -T pinup-popper -t 'My Game.vpx' -a backglass=bg.jpg -a roms-folder=./roms")]
pub struct Cli {
    /// Explicit configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the package archive
    Build {
        #[command(flatten)]
        layout: Layout,
        /// Archive entry compression; a bare flag selects deflate
        #[arg(long, value_name = "METHOD", num_args = 0..=1, require_equals = true)]
        compression: Option<Option<String>>,
        /// Output file (defaults to the configured name in the output directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show the package layout without building it
    Preview {
        #[command(flatten)]
        layout: Layout,
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
        /// List every archive path, including files inside folder items
        #[arg(long, conflicts_with = "json")]
        flat: bool,
    },
    /// Show file, folder and size totals
    Summary {
        #[command(flatten)]
        layout: Layout,
        #[arg(long)]
        json: bool,
    },
    /// List built-in templates
    Templates,
    /// List preset items
    Presets,
    /// Save the current layout as a template file
    ExportTemplate {
        #[command(flatten)]
        layout: Layout,
        /// Name of the new template
        #[arg(long)]
        template_name: String,
        /// Output file (defaults to a name derived from the template name)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Which items make up the package and which files they hold.
#[derive(Args, Debug, Default)]
pub struct Layout {
    /// Built-in template key or path to a template JSON file
    #[arg(short = 'T', long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Add a preset item by id (repeatable)
    #[arg(short, long = "preset", value_name = "ID")]
    pub presets: Vec<String>,

    /// The table file; its name minus extension becomes the primary name
    #[arg(short, long, value_name = "FILE")]
    pub table: Option<PathBuf>,

    /// Primary name, overriding the one taken from the table file
    #[arg(short, long)]
    pub name: Option<String>,

    /// Attach a file or folder to the item with the given id or label (repeatable)
    #[arg(short, long = "attach", value_name = "ITEM=PATH", value_parser = parse_attachment)]
    pub attachments: Vec<(String, PathBuf)>,

    /// Leave the first item (the table file) out of the package
    #[arg(long)]
    pub no_table: bool,
}

fn parse_attachment(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((key, path)) if !key.trim().is_empty() && !path.is_empty() => {
            Ok((key.trim().to_string(), PathBuf::from(path)))
        },
        _ => Err(format!("expected ITEM=PATH, got `{s}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("roms=./roms", Some(("roms", "./roms")))]
    #[case(" Backglass =a=b.png", Some(("Backglass", "a=b.png")))]
    #[case("=x", None)]
    #[case("roms=", None)]
    #[case("roms", None)]
    fn test_parse_attachment(#[case] input: &str, #[case] expected: Option<(&str, &str)>) {
        let expected = expected.map(|(k, p)| (k.to_string(), PathBuf::from(p)));
        assert_eq!(parse_attachment(input).ok(), expected);
    }

    #[rstest]
    #[case(&["build"], None)]
    #[case(&["build", "--compression"], Some(None))]
    #[case(&["build", "--compression=stored"], Some(Some("stored")))]
    fn test_compression_flag(#[case] args: &[&str], #[case] expected: Option<Option<&str>>) {
        let cli = Cli::try_parse_from(std::iter::once("tablepack").chain(args.iter().copied())).unwrap();
        let Command::Build { compression, .. } = cli.command else { panic!("expected build") };
        assert_eq!(compression, expected.map(|o| o.map(String::from)));
    }

    #[test]
    fn test_layout_args() {
        let cli = Cli::try_parse_from([
            "tablepack",
            "-v",
            "preview",
            "-T",
            "pinup-popper",
            "-t",
            "My Game.vpx",
            "-a",
            "roms-folder=roms",
            "-a",
            "Backglass=bg.jpg",
            "-p",
            "vpx-directb2s",
            "--no-table",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Command::Preview { layout, json, flat } = cli.command else { panic!("expected preview") };
        assert!(!json && !flat);
        assert_eq!(layout.template.as_deref(), Some("pinup-popper"));
        assert_eq!(layout.table, Some(PathBuf::from("My Game.vpx")));
        assert_eq!(layout.attachments.len(), 2);
        assert_eq!(layout.presets, vec!["vpx-directb2s"]);
        assert!(layout.no_table);
    }
}
