//! markupgen -- build a single element from the command line and print it.
//!
//! Exposes the combined element call (tag, attributes, text) as a CLI:
//!
//! ```text
//! markupgen a -a class=nav -a href=/docs -a class=active -t Docs --convention html
//! <a class="nav active" href="/docs">Docs</a>
//! ```

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use markupgen::html::{ExtraVoidElements, HtmlVoidElements, NoVoidElements};
use markupgen::serial::{serialize_encoded, serialize_with_options};
use markupgen::tree::{NodeId, NodeKind};
use markupgen::util::name::validate_name;
use markupgen::{
    AttrValue, Attributes, Convention, Document, ErrorKind, EscapeOptions, MarkupError,
};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// markupgen -- render an HTML or XML element with attributes and text.
#[derive(Parser, Debug)]
#[command(name = "markupgen", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Tag name of the element to build. An empty string builds a fragment.
    tag: String,

    /// Print additional information during processing.
    #[arg(long)]
    verbose: bool,

    // -- Content -----------------------------------------------------------
    /// Attribute as KEY=VALUE. Repeating a key builds a space-separated list.
    #[arg(short, long = "attr", value_name = "KEY=VALUE")]
    attrs: Vec<String>,

    /// Boolean attribute set to true.
    #[arg(long = "flag", value_name = "KEY")]
    flags: Vec<String>,

    /// Boolean attribute set to false (only rendered by XML conventions).
    #[arg(long = "off", value_name = "KEY")]
    off: Vec<String>,

    /// Text content. Multiple values are concatenated.
    #[arg(short, long = "text", value_name = "TEXT")]
    text: Vec<String>,

    // -- Rendering ---------------------------------------------------------
    /// Output convention: html, xml1 or xhtml.
    #[arg(long, default_value = "xml1")]
    convention: String,

    /// Escape text and attribute values.
    #[arg(long)]
    escape: bool,

    /// Additional tag name to treat as a void element.
    #[arg(long = "void", value_name = "TAG")]
    void: Vec<String>,

    /// Do not treat any HTML element as void (only `--void` tags are).
    #[arg(long)]
    no_void: bool,

    /// Encode the output in the given charset (e.g. UTF-8, ISO-8859-1).
    #[arg(long, value_name = "ENCODING")]
    encoding: Option<String>,

    /// Save output to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<String>,

    // -- Debug options -----------------------------------------------------
    /// Print a debug representation of the built tree to stderr.
    #[arg(long)]
    debug: bool,

    /// Print timing information for building and rendering.
    #[arg(long)]
    timing: bool,
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_SUCCESS: u8 = 0;
const EXIT_INPUT_ERROR: u8 = 1;
const EXIT_OUTPUT_ERROR: u8 = 2;

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    ExitCode::from(run(&cli))
}

fn run(cli: &Cli) -> u8 {
    // -- Options -----------------------------------------------------------
    let options = match render_options(cli) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("markupgen: {e}");
            return EXIT_INPUT_ERROR;
        }
    };

    // -- Build -------------------------------------------------------------
    let start_build = Instant::now();

    let mut doc = new_document(cli).with_escape_options(options);
    let id = match build(cli, &mut doc) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("markupgen: {e}");
            return EXIT_INPUT_ERROR;
        }
    };

    if cli.timing {
        let elapsed = start_build.elapsed();
        eprintln!("Building took {elapsed:?}");
    }
    if cli.verbose {
        eprintln!(
            "markupgen: built {} node(s), convention {}, escaping {}",
            doc.node_count(),
            options.convention,
            if options.enabled { "on" } else { "off" }
        );
    }
    if cli.debug {
        eprint!("{}", format_debug_tree(&doc, id));
    }

    // -- Render ------------------------------------------------------------
    let start_render = Instant::now();

    let bytes = if let Some(label) = &cli.encoding {
        match serialize_encoded(&doc, id, &options, label) {
            Ok(mut bytes) => {
                bytes.push(b'\n');
                bytes
            }
            Err(e) => {
                eprintln!("markupgen: {e}");
                return EXIT_INPUT_ERROR;
            }
        }
    } else {
        let mut markup = serialize_with_options(&doc, id, &options);
        markup.push('\n');
        markup.into_bytes()
    };

    if cli.timing {
        let elapsed = start_render.elapsed();
        eprintln!("Rendering took {elapsed:?}");
    }

    match write_output(cli, &bytes) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("markupgen: failed to write output: {e}");
            EXIT_OUTPUT_ERROR
        }
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

fn render_options(cli: &Cli) -> Result<EscapeOptions, MarkupError> {
    let convention: Convention = cli.convention.parse()?;
    Ok(EscapeOptions::default()
        .enabled(cli.escape)
        .convention(convention))
}

fn new_document(cli: &Cli) -> Document {
    let extra = cli.void.clone();
    if cli.no_void {
        Document::with_void_elements(ExtraVoidElements::new(NoVoidElements, extra))
    } else {
        Document::with_void_elements(ExtraVoidElements::new(HtmlVoidElements, extra))
    }
}

/// Builds the requested element as a new root.
fn build(cli: &Cli, doc: &mut Document) -> Result<NodeId, MarkupError> {
    if !cli.tag.is_empty() {
        validate_name(&cli.tag)?;
    }
    let attrs = collect_attributes(cli)?;
    let text: Vec<&str> = cli.text.iter().map(String::as_str).collect();
    Ok(doc.element(None, &cli.tag, attrs, &text))
}

/// Gathers `--attr`, `--flag` and `--off` into one attribute map, in that
/// order.
fn collect_attributes(cli: &Cli) -> Result<Attributes, MarkupError> {
    let mut attrs = Attributes::new();
    for spec in &cli.attrs {
        let (key, value) = parse_attribute_arg(spec)?;
        let merged = match attrs.get(key) {
            Some(AttrValue::Text(first)) => {
                AttrValue::List(vec![first.clone(), value.to_string()])
            }
            Some(AttrValue::List(items)) => {
                let mut items = items.clone();
                items.push(value.to_string());
                AttrValue::List(items)
            }
            _ => AttrValue::from(value),
        };
        attrs.set(key, merged);
    }
    for key in &cli.flags {
        attrs.set(validate_name(key)?, true);
    }
    for key in &cli.off {
        attrs.set(validate_name(key)?, false);
    }
    Ok(attrs)
}

/// Splits a `KEY=VALUE` argument at the first `=`.
fn parse_attribute_arg(spec: &str) -> Result<(&str, &str), MarkupError> {
    let (key, value) = spec.split_once('=').ok_or_else(|| {
        MarkupError::new(
            ErrorKind::InvalidAttribute,
            format!("'{spec}' (expected KEY=VALUE)"),
        )
    })?;
    Ok((validate_name(key)?, value))
}

// ---------------------------------------------------------------------------
// Debug output
// ---------------------------------------------------------------------------

/// Formats the tree under `id` as an indented listing, one node per line.
fn format_debug_tree(doc: &Document, id: NodeId) -> String {
    let mut output = String::new();
    format_debug_node(doc, id, 0, &mut output);
    output
}

fn format_debug_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let indent: String = "  ".repeat(depth);
    let data = doc.node(id);

    match &data.kind {
        NodeKind::Element { name, void } => {
            out.push_str(&indent);
            out.push_str("ELEMENT ");
            out.push_str(name);
            if *void {
                out.push_str(" (void)");
            }
            out.push('\n');
            for (key, value) in data.attributes.iter() {
                let _ = writeln!(out, "{indent}  ATTRIBUTE {key}={value:?}");
            }
        }
        NodeKind::Text { content } if content.is_empty() => {
            out.push_str(&indent);
            out.push_str("FRAGMENT\n");
        }
        NodeKind::Text { content } => {
            out.push_str(&indent);
            out.push_str("TEXT ");
            // Show the text content, replacing newlines for readability
            out.push_str(&content.replace('\n', "\\n"));
            out.push('\n');
        }
    }
    for child in doc.children(id) {
        format_debug_node(doc, child, depth + 1, out);
    }
}

// ---------------------------------------------------------------------------
// Output writing
// ---------------------------------------------------------------------------

/// Writes output to stdout or to the file specified by --output.
fn write_output(cli: &Cli, content: &[u8]) -> io::Result<()> {
    if let Some(ref output_file) = cli.output {
        fs::write(output_file, content)
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content)?;
        // Flush stdout to ensure output is complete, especially when piped.
        stdout.flush()
    }
}
