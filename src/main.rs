use clap::Parser;
use clap::Subcommand;
use repertoire::analysis::report;
use repertoire::catalog::Catalog;
use repertoire::config::Config;
use repertoire::console;
use repertoire::stats::Trie;
use repertoire::transpose;
use repertoire::transpose::Generator;

#[derive(Parser)]
#[command(version, about = "opening attainability analysis over move-frequency statistics")]
struct Args {
    #[arg(long, default_value = "config.json")]
    config: String,
    /// log sparse-data diagnostics too
    #[arg(long)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// enumerate and curate transpositions for every opening
    Transpose {
        /// offer new candidates even where transpositions exist
        #[arg(long)]
        append: bool,
    },
    /// recompute aggregated summaries (main line + transpositions)
    Update,
    /// recompute main-line-only summaries
    Mainline,
    /// print the analysis of a single opening
    Show { opening: String },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(args.debug)?;
    let config = Config::load(&args.config)?;
    let mut catalog = Catalog::load(&config.openings)?;
    let mut approve = console::Terminal;
    match args.command {
        Command::Transpose { append } => {
            let generator = Generator::new(config.max_permutations);
            let accepted = transpose::curate(&mut catalog, &generator, &mut approve, append);
            println!(
                "{}",
                console::success(&format!("{} transpositions accepted", accepted))
            );
            catalog.save(&mut approve)?;
        }
        Command::Update => {
            let stats = Trie::load(&config.stats_path())?;
            let updated = report::update_catalog(&mut catalog, &stats, config.rating);
            println!(
                "{}",
                console::success(&format!(
                    "{} of {} openings updated at rating {}",
                    updated,
                    catalog.len(),
                    config.rating
                ))
            );
            catalog.save(&mut approve)?;
        }
        Command::Mainline => {
            let stats = Trie::load(&config.stats_path())?;
            let updated = report::update_catalog_main(&mut catalog, &stats, config.rating);
            println!(
                "{}",
                console::success(&format!(
                    "{} of {} main lines updated at rating {}",
                    updated,
                    catalog.len(),
                    config.rating
                ))
            );
            catalog.save(&mut approve)?;
        }
        Command::Show { opening } => {
            let stats = Trie::load(&config.stats_path())?;
            let record = catalog.get(&opening)?;
            let color = record.color();
            let (prevalence, _) = report::evaluate(&stats, record, color.other());
            let (attainability, best_try) = report::evaluate(&stats, record, color);
            println!("{}", console::header(&format!("### {} ###", opening)));
            println!("{}", console::info(&format!("opening color: {:?}", color)));
            println!(
                "{}",
                console::success(&format!(
                    "prevalence    = {} (about 1 in {} games)",
                    repertoire::round3(prevalence),
                    report::expected_games(prevalence)
                ))
            );
            println!(
                "{}",
                console::success(&format!(
                    "attainability = {} (about 1 in {} games)",
                    repertoire::round3(attainability),
                    report::expected_games(attainability)
                ))
            );
            match best_try.as_deref() {
                None | Some(report::NO_BEST_TRY) => {
                    println!("{}", console::error("no best-try line"))
                }
                Some(line) => println!("{}", line),
            }
        }
    }
    Ok(())
}

fn log(debug: bool) -> anyhow::Result<()> {
    let level = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}
