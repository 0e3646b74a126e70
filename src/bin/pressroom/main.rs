use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use pressroom::config::Config;
use pressroom::content_store::{ContentStore, SortOrder};
use pressroom::loader::load_posts;
use pressroom::logger::configure_logger;
use pressroom::paginator::Paginator;
use pressroom::post::Post;
use pressroom::text_utils::format_date;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "pressroom.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists posts, most recent first
    List(ListArgs),
    /// Shows one post with its body
    Show(ShowArgs),
    /// Lists tags by number of posts
    Tags,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Only posts carrying this tag (case-insensitive)
    #[arg(short, long)]
    tag: Option<String>,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    #[arg(long)]
    oldest_first: bool,

    /// Also list posts dated in the future
    #[arg(long)]
    include_future: bool,

    /// Prints the page as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    id: String,

    #[arg(long)]
    json: bool,
}

fn list_cmd(config: &Config, store: &ContentStore, args: ListArgs) -> Result<()> {
    let order = if args.oldest_first { SortOrder::OldestFirst } else { SortOrder::NewestFirst };
    let as_of = config.defaults.as_of();

    let listing = match args.tag {
        Some(ref tag) => store.list_by_tag(tag, order),
        None => store.list_all(order),
    };
    let posts: Vec<&Post> = listing.iter()
        .filter(|p| args.include_future || p.is_published(as_of))
        .collect();

    let paginator = Paginator::from(&posts, config.defaults.page_size);
    if paginator.page_count() == 0 {
        info!("No posts to list");
        return Ok(());
    }
    let page = match paginator.get_page(args.page) {
        Ok(page) => page,
        Err(e) => bail!(e),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    for post in page {
        println!("{}  {:<30} {} [{}]", format_date(&post.published_at), post.id.as_str(), post.title, post.tags.join(" "));
    }
    println!("-- page {} of {}", args.page, paginator.page_count());
    Ok(())
}

fn show_cmd(store: &ContentStore, args: ShowArgs) -> Result<()> {
    let post = store.get(&args.id)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(post)?);
    } else {
        println!("{}\n", post);
        print!("{}", post.body);
    }
    Ok(())
}

fn tags_cmd(store: &ContentStore) {
    for tag in store.tags() {
        println!("{:>4}  {}", tag.count, tag.tag);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run pressroom --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let mut store = ContentStore::new();
    load_posts(&mut store, &config.paths.posts_dir, config.defaults.index_base_name())?;

    match args.command {
        Command::List(list_args) => list_cmd(&config, &store, list_args)?,
        Command::Show(show_args) => show_cmd(&store, show_args)?,
        Command::Tags => tags_cmd(&store),
    };

    Ok(())
}
