use selkie::otter::{LayoutConfig, Note};
use selkie::render::{SvgOptions, write_bpmn, write_mermaid, write_svg};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Document(selkie::DocumentError),
    Render(selkie::render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Document(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<selkie::DocumentError> for CliError {
    fn from(value: selkie::DocumentError) -> Self {
        Self::Document(value)
    }
}

impl From<selkie::render::Error> for CliError {
    fn from(value: selkie::render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Bpmn,
    Svg,
    Mermaid,
    LayoutJson,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bpmn" => Ok(Self::Bpmn),
            "svg" => Ok(Self::Svg),
            "mermaid" | "mmd" => Ok(Self::Mermaid),
            "layout-json" | "json" => Ok(Self::LayoutJson),
            _ => Err(()),
        }
    }
}

const USAGE: &str = "usage: selkie <input.json | -> [--format bpmn|svg|mermaid|layout-json] [--output PATH] [--scale FACTOR]";

#[derive(Debug)]
struct Args {
    input: String,
    format: OutputFormat,
    output: Option<String>,
    scale: Option<f64>,
}

fn parse_args<I: Iterator<Item = String>>(mut argv: I) -> Result<Args, CliError> {
    let _ = argv.next();
    let mut input: Option<String> = None;
    let mut format = OutputFormat::default();
    let mut output: Option<String> = None;
    let mut scale: Option<f64> = None;

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--format" | "-f" => {
                let value = argv.next().ok_or(CliError::Usage(USAGE))?;
                format = value.parse().map_err(|_| CliError::Usage(USAGE))?;
            }
            "--output" | "-o" => {
                output = Some(argv.next().ok_or(CliError::Usage(USAGE))?);
            }
            "--scale" => {
                let value = argv.next().ok_or(CliError::Usage(USAGE))?;
                scale = Some(value.parse().map_err(|_| CliError::Usage(USAGE))?);
            }
            "--help" | "-h" => return Err(CliError::Usage(USAGE)),
            _ if input.is_none() => input = Some(arg),
            _ => return Err(CliError::Usage(USAGE)),
        }
    }

    Ok(Args {
        input: input.ok_or(CliError::Usage(USAGE))?,
        format,
        output,
        scale,
    })
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn describe(note: &Note) -> String {
    match note {
        Note::CycleBroken { edge } => {
            format!("note: transition `{edge}` closes a cycle; drawn as feedback")
        }
        Note::LaneDefaulted { node } => {
            format!("note: node `{node}` had no lane evidence; defaulted to the first lane")
        }
        Note::EmptyGraph => "note: the document contains no nodes".to_string(),
    }
}

fn run() -> Result<(), CliError> {
    let args = parse_args(std::env::args())?;
    let json = read_input(&args.input)?;

    let config = LayoutConfig {
        scale: args.scale,
        ..LayoutConfig::default()
    };
    let (doc, layout) = selkie::layout_flow(&json, &config)?;

    for note in &layout.notes {
        eprintln!("{}", describe(note));
    }

    let rendered = match args.format {
        OutputFormat::Bpmn => write_bpmn(&doc, &layout)?,
        OutputFormat::Svg => write_svg(&layout, &SvgOptions::default())?,
        OutputFormat::Mermaid => {
            let mut text = write_mermaid(&doc);
            text.push('\n');
            text
        }
        OutputFormat::LayoutJson => {
            let mut text = serde_json::to_string_pretty(&layout)?;
            text.push('\n');
            text
        }
    };

    match args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
