use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use gvcbrowser::arguments::{parse_filter_arg, Arguments};
use gvcbrowser::config::Config;
use gvcbrowser::filtering::selection::FilterSelection;
use gvcbrowser::filtering::conditional::{
    filtered_color_counts, should_show_face_color, should_show_hair_color,
};
use gvcbrowser::filtering::{suggestions, FacetField, SuggestionTarget};
use gvcbrowser::gallery::Gallery;
use gvcbrowser::listings::quote::fetch_quote;
use gvcbrowser::listings::{ListingMap, ListingsService, MarketClient};
use gvcbrowser::logger::{self, LogTag};
use gvcbrowser::records::bpr::{calculate_bpr, format_bpr};
use gvcbrowser::records::{badges, load_records, BadgeCatalog, Record};

#[tokio::main]
async fn main() {
    let args = Arguments::parse();
    logger::init(&args.debug_modules, args.verbose, args.quiet);

    if let Err(err) = run(args).await {
        logger::error(LogTag::System, &format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run(args: Arguments) -> Result<()> {
    let config = Config::load(&args.config)?;

    let data_path = args.data.as_deref().unwrap_or(&config.dataset.path);
    let badges_path = args.badges.as_deref().unwrap_or(&config.dataset.badges_path);

    let records = load_records(Path::new(data_path))?;

    let catalog = match BadgeCatalog::load(Path::new(badges_path)) {
        Ok(catalog) => catalog,
        Err(err) => {
            // Badge display names degrade to raw keys without the catalog.
            logger::warning(LogTag::Badges, &format!("{:#}", err));
            BadgeCatalog::empty()
        }
    };
    badges::init_global(catalog);

    let batch = args.limit.unwrap_or(config.general.visible_batch);
    let mut gallery = Gallery::with_batch(records, batch.max(1));
    gallery.selection = build_selection(&args)?;

    if let Some(query) = &args.suggest {
        print_suggestions(query, &gallery);
        return Ok(());
    }
    if args.facets {
        print_facets(&gallery);
        return Ok(());
    }

    let wants_listings = args.listings
        || args.watch
        || gallery.selection.listed
        || gallery.selection.sort.uses_price();

    if !wants_listings {
        print_view(&gallery, &ListingMap::new(), None);
        return Ok(());
    }

    let client = MarketClient::new(&config.marketplace)
        .context("Failed to build marketplace client")?;
    let service = ListingsService::with_page_cap(Arc::new(client), config.marketplace.max_pages);
    service.refresh().await;

    let quote = fetch_quote(
        &config.marketplace.quote_url,
        Duration::from_secs(config.marketplace.request_timeout_secs),
    )
    .await;

    print_view(&gallery, &service.listings(), quote);
    if let Some(error) = service.state().error {
        println!("{} {}", "listings:".red(), error);
    }

    if args.watch {
        let interval = Duration::from_secs(config.marketplace.refresh_interval_secs.max(1));
        logger::info(
            LogTag::System,
            &format!("watching, refresh every {}s (ctrl-c to stop)", interval.as_secs()),
        );
        let _refresher = service.start(interval);
        let mut ticker = tokio::time::interval(interval);
        // The interval fires immediately; the first view was just printed.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            print_view(&gallery, &service.listings(), quote);
        }
    }

    Ok(())
}

fn build_selection(args: &Arguments) -> Result<FilterSelection> {
    let mut selection = match &args.query {
        Some(query) => FilterSelection::from_query_string(query),
        None => FilterSelection::default(),
    };

    for raw in &args.filters {
        let (field, values) = parse_filter_arg(raw).map_err(anyhow::Error::msg)?;
        for value in values {
            selection.select(field, &value);
        }
    }
    if let Some(search) = &args.search {
        selection.search = search.clone();
    }
    if let Some(sort) = args.sort {
        selection.sort = sort;
    }
    if args.listed {
        selection.listed = true;
    }
    Ok(selection)
}

fn print_suggestions(query: &str, gallery: &Gallery) {
    let ranked = suggestions(query, gallery.index(), badges::global());
    if ranked.is_empty() {
        println!("no suggestions for '{}'", query);
        return;
    }
    for suggestion in ranked {
        let kind = match suggestion.target {
            SuggestionTarget::Filter(field) => field.as_str(),
            SuggestionTarget::Search => "search",
        };
        println!("{}  {}", suggestion.label.bold(), format!("[{}]", kind).dimmed());
    }
}

fn print_facets(gallery: &Gallery) {
    let index = gallery.index();
    let selection = &gallery.selection;
    for field in FacetField::ALL {
        // Context-dependent facets mirror the sidebar rules.
        match field {
            FacetField::FaceColor if !should_show_face_color(selection, index) => continue,
            FacetField::HairColor if !should_show_hair_color(selection, index) => continue,
            FacetField::ColorCount => {
                let counts = filtered_color_counts(index);
                if !counts.is_empty() {
                    println!("{}", field.label().bold().underline());
                    for (value, count) in &counts {
                        println!("  {:<28} {}", value, count);
                    }
                }
                continue;
            }
            _ => {}
        }
        let counts = index.flat_counts(field);
        if counts.is_empty() {
            continue;
        }
        println!("{}", field.label().bold().underline());
        for (value, count) in counts {
            println!("  {:<28} {}", value, count);
        }
    }
}

fn print_view(gallery: &Gallery, listings: &ListingMap, quote: Option<f64>) {
    let filtered = gallery.filtered(listings);
    let total = filtered.len();
    let visible = gallery.visible(listings);

    for chip in gallery.selection.active_filters(badges::global()) {
        println!("{} {}", format!("{}:", chip.field_label).cyan(), chip.label);
    }

    for record in &visible {
        print_row(record, listings.get(&record.id), quote);
    }
    println!(
        "{}",
        format!("showing {} of {} matching", visible.len(), total).dimmed()
    );
}

fn print_row(record: &Record, listing: Option<&gvcbrowser::listings::Listing>, quote: Option<f64>) {
    let price = match listing {
        Some(listing) => {
            let native = format!("{:.4} {}", listing.price, listing.currency);
            match quote {
                Some(usd) => format!("{} (${:.0})", native, listing.price * usd).green().to_string(),
                None => native.green().to_string(),
            }
        }
        None => "unlisted".dimmed().to_string(),
    };
    let bpr = calculate_bpr(record.active_badges(), listing.map_or(0.0, |l| l.price));
    println!(
        "#{:<5} {:<7} {:<24} {:<20} rarity {:>8.2}  bpr {:>4}  {}",
        record.id,
        record.gender,
        record.body,
        record.type_full,
        record.rarity_score,
        format_bpr(bpr.score, listing.is_some()),
        price,
    );
}
