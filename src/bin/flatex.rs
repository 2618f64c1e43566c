use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use flatex::path::split;
use flatex::{FlatMap, Operation, Plan, StringTokenizer, Tree, Value, document};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flatex", about = "Bulk structural edits on nested JSON documents")]
struct Cli {
    #[arg(long, global = true, default_value = ".")]
    separator: String,

    #[arg(long, short, global = true)]
    output: Option<String>,

    #[arg(long, global = true)]
    force: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Apply { file: String, plan: String },
    Move { file: String, src: String, dst: String },
    Del { file: String, path: String },
    Append { file: String, src: String, dst: String },
    Get { file: String, path: String },
    Tree { file: String },
    Flatten { file: String },
}

fn emit(cli: &Cli, tree: &Tree) -> Result<()> {
    match &cli.output {
        Some(path) => {
            if document::exists(path) && !cli.force {
                bail!("File already exists: {} (use --force)", path);
            }
            document::save(path, tree)?;
            eprintln!("Wrote {}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(&tree.to_json())?),
    }
    Ok(())
}

fn single(cli: &Cli, file: &str, op: Operation) -> Result<()> {
    let mut tree = document::load(file)?;
    let plan = Plan {
        separator: cli.separator.clone(),
        operations: vec![op],
    };
    plan.apply(&mut tree)?;
    emit(cli, &tree)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Apply { file, plan } => {
            let mut tree = document::load(file)?;
            let plan = document::load_plan(plan)?;
            let applied = plan.apply(&mut tree)?;
            eprintln!("Applied {} operations", applied);
            emit(&cli, &tree)?;
        }
        Commands::Move { file, src, dst } => {
            let op = Operation::Move {
                src: src.clone(),
                dst: dst.clone(),
            };
            single(&cli, file, op)?;
        }
        Commands::Del { file, path } => {
            single(&cli, file, Operation::Del { path: path.clone() })?;
        }
        Commands::Append { file, src, dst } => {
            let op = Operation::Append {
                src: src.clone(),
                dst: dst.clone(),
            };
            single(&cli, file, op)?;
        }
        Commands::Get { file, path } => {
            let tree = document::load(file)?;
            match tree.get(&split(path, &cli.separator)) {
                Some(v) => println!("{}", serde_json::to_string_pretty(&v.to_json())?),
                None => println!("Path {} not found", path),
            }
        }
        Commands::Tree { file } => {
            let mut tree = document::load(file)?;
            tree.sort();
            print!("{}", tree);
        }
        Commands::Flatten { file } => {
            let tree = document::load(file)?;
            let Value::Map(map) = tree.export() else {
                bail!("Only JSON objects can be flattened: {}", file);
            };
            let flat = FlatMap::flatten(&map, StringTokenizer::new(cli.separator.clone()))?;
            for (k, v) in flat.iter() {
                println!("{} = {}", k, v.to_json());
            }
        }
    }

    Ok(())
}
