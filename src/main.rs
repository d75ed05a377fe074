use clap::{Args, Parser, Subcommand};
use folio::carousel::{Carousel, page_size_for_width};
use folio::config::{self, SiteConfig};
use folio::contact::{ContactForm, ContactSession, EmailJsRequest, OutboxDelivery};
use folio::head::HeadDocument;
use folio::output;
use folio::reveal::{ViewportSimulator, attach_sections};
use folio::site::{PageSession, Route};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("FOLIO_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("FOLIO_GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Page behavior for a personal portfolio site")]
#[command(long_about = "\
Page behavior for a personal portfolio site

Drives the site's head metadata, reveal-on-scroll, projects carousel, and
contact form against in-memory hosts, using the same config the site ships.

Routes: / /about /resume /projects /contact

Head metadata resolution (first available wins):
  Title:              \"{page title} | {owner_name}\"
  Social title:       social_title → page title
  Social description: social_description → description → unchanged

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log debug detail to stderr (FOLIO_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the document head after navigating to a route
    Head {
        /// Route path, e.g. /about
        path: String,
        /// Route visited before, whose tags carry over where the page is silent
        #[arg(long)]
        from: Option<String>,
    },
    /// List routes and their resolved titles
    Pages,
    /// Step through the projects carousel
    Carousel(CarouselArgs),
    /// Simulate reveal-on-scroll for page sections
    Reveal(RevealArgs),
    /// Validate a contact message and print or queue its delivery request
    Contact(ContactArgs),
    /// Validate config.toml
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Args)]
struct CarouselArgs {
    /// Number of items in the list
    #[arg(long)]
    count: usize,
    /// Viewport width in px; picks the page size from the configured breakpoints
    #[arg(long, conflicts_with = "page_size")]
    width: Option<u32>,
    /// Items per page
    #[arg(long)]
    page_size: Option<usize>,
    /// Steps: `next`, `prev`, a page number, or `width=PX` to resize
    #[arg(allow_negative_numbers = true)]
    steps: Vec<String>,
}

#[derive(Args)]
struct RevealArgs {
    /// Viewport height in px
    #[arg(long, default_value_t = 800.0)]
    viewport: f64,
    /// Section as TOP:HEIGHT in px (repeatable)
    #[arg(long = "region", value_parser = parse_region, required = true)]
    regions: Vec<(f64, f64)>,
    /// Scroll positions to visit in order (repeatable)
    #[arg(long = "scroll", default_value = "0")]
    scrolls: Vec<f64>,
}

#[derive(Args)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long)]
    message: String,
    /// Append the delivery request to this file instead of printing it
    #[arg(long)]
    outbox: Option<PathBuf>,
}

fn parse_region(s: &str) -> Result<(f64, f64), String> {
    let (top, height) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TOP:HEIGHT, got '{s}'"))?;
    let top: f64 = top.trim().parse().map_err(|e| format!("bad top '{top}': {e}"))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|e| format!("bad height '{height}': {e}"))?;
    if height < 0.0 {
        return Err(format!("height must not be negative, got {height}"));
    }
    Ok((top, height))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Head { path, from } => {
            let config = config::load_config(&cli.config_dir)?;
            let mut head = HeadDocument::site_default(&config.site);
            let mut session = PageSession::new(&config);
            if let Some(from) = from {
                session.render(route_for(&from)?, &config, &mut head);
            }
            session.render(route_for(&path)?, &config, &mut head);
            output::print_head(&head);
        }
        Command::Pages => {
            let config = config::load_config(&cli.config_dir)?;
            output::print_pages(&config);
        }
        Command::Carousel(args) => {
            let config = config::load_config(&cli.config_dir)?;
            run_carousel(&args, &config)?;
        }
        Command::Reveal(args) => {
            let config = config::load_config(&cli.config_dir)?;
            run_reveal(&args, &config);
        }
        Command::Contact(args) => {
            let config = config::load_config(&cli.config_dir)?;
            let mut session = ContactSession::new(config.contact.clone());
            session.form = ContactForm {
                name: args.name,
                email: args.email,
                subject: args.subject,
                message: args.message,
            };
            match args.outbox {
                Some(path) => {
                    let mut outbox = OutboxDelivery::new(path, config.contact.clone());
                    let notice = session.submit(&mut outbox)?;
                    for line in output::format_notice(&notice) {
                        println!("{}", line);
                    }
                }
                None => {
                    let message = session.form.to_message(&config.contact)?;
                    println!("{}", EmailJsRequest::new(&config.contact, &message).to_json()?);
                }
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config_dir.join(config::CONFIG_FILE).display());
            let config = config::load_config(&cli.config_dir)?;
            output::print_pages(&config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `FOLIO_LOG` takes an `EnvFilter` directive.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "folio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn route_for(path: &str) -> Result<Route, String> {
    Route::from_path(path).ok_or_else(|| {
        let known: Vec<&str> = Route::ALL.iter().map(|r| r.path()).collect();
        format!("unknown route '{path}'. Known: {}", known.join(" "))
    })
}

fn run_carousel(args: &CarouselArgs, config: &SiteConfig) -> Result<(), String> {
    let breakpoints = &config.carousel.breakpoints;
    let page_size = match (args.page_size, args.width) {
        (Some(size), _) => size,
        (None, Some(width)) => page_size_for_width(breakpoints, width),
        (None, None) => 1,
    };
    let items: Vec<String> = (1..=args.count).map(|i| format!("#{i}")).collect();
    let mut carousel = Carousel::new(items.len()).with_page_size(page_size);
    println!("{}", output::format_carousel_step("start", &carousel, &items));

    for step in &args.steps {
        match step.as_str() {
            "next" => carousel.next(),
            "prev" | "previous" => carousel.previous(),
            other => {
                if let Some(width) = other.strip_prefix("width=") {
                    let width: u32 = width
                        .parse()
                        .map_err(|e| format!("bad width in '{other}': {e}"))?;
                    carousel.set_page_size(page_size_for_width(breakpoints, width));
                } else {
                    let page: isize = other
                        .parse()
                        .map_err(|_| format!("unknown step '{other}' (next, prev, N, width=PX)"))?;
                    carousel.select_indicator(page);
                }
            }
        }
        println!("{}", output::format_carousel_step(step, &carousel, &items));
    }
    Ok(())
}

fn run_reveal(args: &RevealArgs, config: &SiteConfig) {
    let sim = ViewportSimulator::new(args.viewport);
    let regions: Vec<_> = args
        .regions
        .iter()
        .map(|(top, height)| sim.mount(*top, *height))
        .collect();
    let sections = attach_sections(&sim, &regions, &config.reveal);

    for &y in &args.scrolls {
        sim.scroll_to(y);
        let frame: Vec<_> = sections
            .iter()
            .filter_map(|s| {
                let entry = sim.entry_for(s.handle.region())?;
                Some((entry, s.handle.is_visible()))
            })
            .collect();
        for line in output::format_reveal_frame(y, &frame) {
            println!("{}", line);
        }
    }
    for section in &sections {
        println!("{}: {}", section.handle.region(), section.style());
    }
}
