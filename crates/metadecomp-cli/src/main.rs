use metadecomp::algorithm::{
    CompartmentAlgorithm, DecompositionAlgorithm, KeggPathways, PredefinedAnnotation,
    SchusterHeuristic,
};
use metadecomp::config::{DEFAULT_CLONING_DEGREE, parse_threshold};
use metadecomp::layout::{LayoutOptions, LayoutStyle};
use metadecomp::pathway_db::{FlatFileDatabase, KeggRestClient, PathwayDatabase};
use metadecomp::view::ProcessDescription;
use metadecomp::{
    BaseGraph, CloneReport, ConfigDocument, Decomposition, DecompositionConfig, LookupError,
    NodeId, OverviewNode, OverviewOptions, Session, Warning,
};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Decomposition(metadecomp::Error),
    Lookup(LookupError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Decomposition(err) => write!(f, "{err}"),
            CliError::Lookup(err) => write!(f, "pathway database: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<metadecomp::Error> for CliError {
    fn from(value: metadecomp::Error) -> Self {
        Self::Decomposition(value)
    }
}

impl From<LookupError> for CliError {
    fn from(value: LookupError) -> Self {
        Self::Lookup(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Stats,
    Decompose,
    Overview,
    View,
}

#[derive(Debug, Clone, Copy, Default)]
enum AlgorithmKind {
    #[default]
    Predefined,
    Kegg,
    Schuster,
    Compartment,
}

impl FromStr for AlgorithmKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "predefined" => Ok(Self::Predefined),
            "kegg" => Ok(Self::Kegg),
            "schuster" => Ok(Self::Schuster),
            "compartment" => Ok(Self::Compartment),
            _ => Err(()),
        }
    }
}

fn parse_layout_style(s: &str) -> Option<LayoutStyle> {
    match s.trim().to_ascii_lowercase().as_str() {
        "circular" => Some(LayoutStyle::Circular),
        "concentric" => Some(LayoutStyle::Concentric),
        "parallel-lines" | "parallel" => Some(LayoutStyle::ParallelLines),
        _ => None,
    }
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    algorithm: AlgorithmKind,
    config: Option<String>,
    notes_key: String,
    degree: usize,
    clone_above: Option<usize>,
    kegg_file: Option<String>,
    kegg_timeout: Duration,
    show_interfaces: bool,
    thickness: Option<(f64, f64)>,
    select: Vec<String>,
    hubs: bool,
    sbgn: bool,
    layout: LayoutStyle,
    seed: u64,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::default(),
            input: None,
            pretty: false,
            algorithm: AlgorithmKind::default(),
            config: None,
            notes_key: "subsystem".to_string(),
            degree: DEFAULT_CLONING_DEGREE,
            clone_above: None,
            kegg_file: None,
            kegg_timeout: Duration::from_secs(30),
            show_interfaces: false,
            thickness: None,
            select: Vec::new(),
            hubs: false,
            sbgn: false,
            layout: LayoutStyle::default(),
            seed: 0,
        }
    }
}

fn usage() -> &'static str {
    "metadecomp-cli\n\
\n\
USAGE:\n\
  metadecomp-cli stats [--pretty] [<network.json>|-]\n\
  metadecomp-cli decompose [DECOMPOSE OPTIONS] [--pretty] [<network.json>|-]\n\
  metadecomp-cli overview [DECOMPOSE OPTIONS] [--show-interfaces] [--thickness <min>,<max>] [--pretty] [<network.json>|-]\n\
  metadecomp-cli view [DECOMPOSE OPTIONS] --select <name> [--select <name>]... [--hubs] [--sbgn] [--layout circular|concentric|parallel-lines] [--seed <n>] [--pretty] [<network.json>|-]\n\
\n\
DECOMPOSE OPTIONS:\n\
  --algorithm predefined|kegg|schuster|compartment   (default: predefined)\n\
  --config <path>          JSON settings (separator, min_pathway_count, cloning.degree_threshold,\n\
                           transporter.enabled, transporter.mode, default_subsystem.enabled,\n\
                           default_subsystem.split, default_subsystem.split_threshold)\n\
  --notes-key <key>        annotation read by the predefined algorithm (default: subsystem)\n\
  --degree <n>             currency metabolite threshold for schuster (default: 8)\n\
  --clone-above <n>        clone species with degree >= n before decomposing\n\
                           (unparsable thresholds fall back to 8)\n\
  --kegg-file <path>       offline KEGG flat file for the kegg algorithm\n\
  --kegg-timeout <secs>    timeout for the KEGG REST service (default: 30)\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Without --kegg-file the kegg algorithm queries https://rest.kegg.jp.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, CliError> {
    s.trim().parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "stats" => args.command = Command::Stats,
            "decompose" => args.command = Command::Decompose,
            "overview" => args.command = Command::Overview,
            "view" => args.command = Command::View,
            "--pretty" => args.pretty = true,
            "--show-interfaces" => args.show_interfaces = true,
            "--hubs" => args.hubs = true,
            "--sbgn" => args.sbgn = true,
            "--algorithm" => {
                args.algorithm = next_value(&mut it)?
                    .parse::<AlgorithmKind>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--notes-key" => args.notes_key = next_value(&mut it)?.clone(),
            "--degree" => {
                args.degree = parse_threshold(next_value(&mut it)?, DEFAULT_CLONING_DEGREE);
            }
            "--clone-above" => {
                args.clone_above = Some(parse_threshold(
                    next_value(&mut it)?,
                    DEFAULT_CLONING_DEGREE,
                ));
            }
            "--kegg-file" => args.kegg_file = Some(next_value(&mut it)?.clone()),
            "--kegg-timeout" => {
                let secs: f64 = parse_number(next_value(&mut it)?)?;
                if !(secs.is_finite() && secs > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.kegg_timeout = Duration::from_secs_f64(secs);
            }
            "--thickness" => {
                let raw = next_value(&mut it)?;
                let Some((lo, hi)) = raw.split_once(',') else {
                    return Err(CliError::Usage(usage()));
                };
                args.thickness = Some((parse_number(lo)?, parse_number(hi)?));
            }
            "--select" => args.select.push(next_value(&mut it)?.clone()),
            "--layout" => {
                args.layout =
                    parse_layout_style(next_value(&mut it)?).ok_or(CliError::Usage(usage()))?;
            }
            "--seed" => args.seed = parse_number(next_value(&mut it)?)?,
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::View) && args.select.is_empty() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn labels(base: &BaseGraph, nodes: impl IntoIterator<Item = NodeId>) -> Vec<String> {
    nodes
        .into_iter()
        .map(|v| base.label(v).to_string())
        .collect()
}

#[derive(Serialize)]
struct StatsOut {
    species: usize,
    reactions: usize,
    edges: usize,
    max_degree: usize,
    degree_histogram: Vec<usize>,
}

#[derive(Serialize)]
struct SubsystemOut {
    id: usize,
    name: String,
    species: Vec<String>,
    reactions: Vec<String>,
}

#[derive(Serialize)]
struct DecomposeOut<'a> {
    algorithm: &'a str,
    subsystems: Vec<SubsystemOut>,
    warnings: &'a [Warning],
    cloning: Vec<CloneReport>,
}

#[derive(Serialize)]
struct OverviewEdgeOut {
    from: String,
    to: String,
    interface_count: usize,
    thickness: f64,
}

#[derive(Serialize)]
struct InterfaceOut {
    from: String,
    to: String,
    species: Vec<String>,
}

#[derive(Serialize)]
struct OverviewOut<'a> {
    nodes: Vec<&'a OverviewNode>,
    edges: Vec<OverviewEdgeOut>,
    interfaces: Vec<InterfaceOut>,
}

#[derive(Serialize)]
struct ViewNodeOut<'a> {
    id: usize,
    #[serde(flatten)]
    node: &'a metadecomp::view::ViewNode,
    shared: bool,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct ViewEdgeOut<'a> {
    from: usize,
    to: usize,
    color: &'a str,
}

#[derive(Serialize)]
struct ViewOut<'a> {
    subsystems: Vec<&'a str>,
    crossings: usize,
    nodes: Vec<ViewNodeOut<'a>>,
    edges: Vec<ViewEdgeOut<'a>>,
}

fn subsystems_out(base: &BaseGraph, d: &Decomposition) -> Vec<SubsystemOut> {
    d.iter()
        .map(|(id, s)| SubsystemOut {
            id: id.0,
            name: s.name().to_string(),
            species: labels(base, s.species().iter().copied()),
            reactions: labels(base, s.reactions().iter().copied()),
        })
        .collect()
}

fn load_config(args: &Args) -> Result<DecompositionConfig, CliError> {
    let Some(path) = args.config.as_deref() else {
        return Ok(DecompositionConfig::default());
    };
    let doc = ConfigDocument::from_json_str(&std::fs::read_to_string(path)?)?;
    Ok(DecompositionConfig::from_document(&doc))
}

fn build_algorithm(args: &Args) -> Result<Box<dyn DecompositionAlgorithm>, CliError> {
    Ok(match args.algorithm {
        AlgorithmKind::Predefined => Box::new(PredefinedAnnotation::new(args.notes_key.clone())),
        AlgorithmKind::Schuster => Box::new(SchusterHeuristic::new(args.degree)),
        AlgorithmKind::Compartment => Box::new(CompartmentAlgorithm),
        AlgorithmKind::Kegg => {
            let db: Box<dyn PathwayDatabase> = match args.kegg_file.as_deref() {
                Some(path) => Box::new(FlatFileDatabase::from_text(&std::fs::read_to_string(
                    path,
                )?)),
                None => Box::new(KeggRestClient::new(args.kegg_timeout)?),
            };
            Box::new(KeggPathways::new(db))
        }
    })
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut session = Session::with_config(load_config(&args)?);
    session.load_network_json(&text)?;

    if let Command::Stats = args.command {
        let base = session.base()?;
        let out = StatsOut {
            species: base.species().len(),
            reactions: base.reactions().len(),
            edges: base.working().edge_count(),
            max_degree: base.max_degree(),
            degree_histogram: base.degree_histogram(),
        };
        return write_json(&out, args.pretty);
    }

    let cloning = match args.clone_above {
        Some(d) => Some(session.clone_species_above(d)?),
        None => None,
    };
    let algorithm = build_algorithm(&args)?;
    session.decompose(algorithm.as_ref())?;

    match args.command {
        Command::Stats => Ok(()),
        Command::Decompose => {
            let base = session.base()?;
            let out = DecomposeOut {
                algorithm: algorithm.name(),
                subsystems: subsystems_out(base, session.decomposition()?),
                warnings: session.warnings(),
                cloning: cloning.into_iter().chain(session.last_cloning()).collect(),
            };
            write_json(&out, args.pretty)
        }
        Command::Overview => {
            session.set_overview_options(OverviewOptions {
                show_interfaces: args.show_interfaces,
            });
            let overview = session.build_overview()?;
            if let Some((lo, hi)) = args.thickness {
                overview.recompute_edge_thickness(lo, hi);
            }
            let overview = session.overview()?;
            let base = session.base()?;
            let g = overview.graph();
            let name = |v: NodeId| g.node(v).map(|n| n.label().to_string()).unwrap_or_default();
            let subsystem_name = |s| {
                overview
                    .decomposition()
                    .subsystem(s)
                    .map(|x| x.name().to_string())
                    .unwrap_or_default()
            };

            let out = OverviewOut {
                nodes: g.nodes().filter_map(|v| g.node(v)).collect(),
                edges: g
                    .edges()
                    .filter_map(|e| {
                        let (v, w) = g.endpoints(e)?;
                        let label = g.edge(e)?;
                        Some(OverviewEdgeOut {
                            from: name(v),
                            to: name(w),
                            interface_count: label.interface_count,
                            thickness: label.thickness,
                        })
                    })
                    .collect(),
                interfaces: overview
                    .interface_pairs()
                    .map(|(a, b)| InterfaceOut {
                        from: subsystem_name(a),
                        to: subsystem_name(b),
                        species: labels(base, overview.interfaces(a, b).iter().copied()),
                    })
                    .collect(),
            };
            write_json(&out, args.pretty)
        }
        Command::View => {
            session.set_view_options(metadecomp::ViewOptions {
                show_hubs: args.hubs,
                ..Default::default()
            });
            if args.sbgn {
                session.set_sbgn_translator(Some(Box::new(ProcessDescription)));
            }
            session.build_overview()?;
            let names: Vec<&str> = args.select.iter().map(String::as_str).collect();
            session.select_subsystems(&names)?;
            let view = session.show_selected_subsystems()?;

            let layout = view.layout(&LayoutOptions {
                style: args.layout,
                crossing: metadecomp::layout::CrossingOptions {
                    seed: args.seed,
                    ..Default::default()
                },
                ..Default::default()
            });
            let g = view.graph();
            let out = ViewOut {
                subsystems: names,
                crossings: layout.crossings,
                nodes: g
                    .nodes()
                    .filter_map(|v| {
                        let node = g.node(v)?;
                        let p = layout.position(v).unwrap_or_default();
                        Some(ViewNodeOut {
                            id: v.index(),
                            node,
                            shared: node.is_shared(),
                            x: p.x,
                            y: p.y,
                        })
                    })
                    .collect(),
                edges: g
                    .edges()
                    .filter_map(|e| {
                        let (v, w) = g.endpoints(e)?;
                        Some(ViewEdgeOut {
                            from: v.index(),
                            to: w.index(),
                            color: g.edge(e)?.color.as_str(),
                        })
                    })
                    .collect(),
            };
            write_json(&out, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
