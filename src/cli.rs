//! Command line interface for browsing and moderating listings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use malnad_homes::config::Config;
use malnad_homes::favorites::{self, FavoriteStore};
use malnad_homes::geolocation::{resolve_origin, FixedGeolocator};
use malnad_homes::models::{Category, Coordinate, GuestType, Listing};
use malnad_homes::moderation::{self, NewListing};
use malnad_homes::query::{self, FilterParams, QueryPage, Selection, SortMode};
use malnad_homes::repository::ListingRepository;

#[derive(Parser, Debug)]
#[command(name = "malnad-homes")]
#[command(about = "Search and moderate Malnad Homes rental listings")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Listings file (overrides MALNAD_DATA_FILE)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search approved listings
    Search(SearchArgs),

    /// Submit a listing for review
    Submit(SubmitArgs),

    /// Show listings awaiting review
    Pending,

    /// Approve a pending listing
    Approve { id: String },

    /// Reject a pending listing
    Reject { id: String },

    /// Save or unsave a listing for a user
    Favorite { user: String, id: String },

    /// Show a user's saved listings
    Saved { user: String },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text matched against title and location
    #[arg(default_value = "")]
    pub text: String,

    /// Maximum price per month
    #[arg(long)]
    pub max_price: Option<u64>,

    /// Villa, PG, Apartment, Hostel or All
    #[arg(long, default_value = "All")]
    pub category: Selection<Category>,

    /// Family, Male, Female or All
    #[arg(long, default_value = "All")]
    pub guest: Selection<GuestType>,

    /// Required amenity (repeatable)
    #[arg(long = "amenity")]
    pub amenities: Vec<String>,

    /// Search around LAT,LNG
    #[arg(long, allow_hyphen_values = true)]
    pub near: Option<Coordinate>,

    /// Search radius in km when --near is given
    #[arg(long)]
    pub radius: Option<f64>,

    /// recommended, price-asc or price-desc
    #[arg(long, default_value = "recommended")]
    pub sort: SortMode,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub category: Category,

    #[arg(long)]
    pub location: String,

    #[arg(long)]
    pub price: u64,

    #[arg(long)]
    pub description: String,

    /// URL of the uploaded main photo
    #[arg(long)]
    pub image: String,

    #[arg(long = "amenity")]
    pub amenities: Vec<String>,

    #[arg(long, default_value = "Any")]
    pub guest: GuestType,

    /// Position as LAT,LNG
    #[arg(long, allow_hyphen_values = true)]
    pub at: Option<Coordinate>,

    #[arg(long)]
    pub owner: Option<String>,
}

pub async fn search(repo: &dyn ListingRepository, config: &Config, args: SearchArgs) -> Result<()> {
    let origin = match args.near {
        Some(coordinate) => resolve_origin(&FixedGeolocator::at(coordinate)).await,
        None => None,
    };

    let params = FilterParams {
        text: args.text,
        max_price: args.max_price.unwrap_or(config.default_max_price),
        category: args.category,
        guest_type: args.guest,
        amenities: args.amenities,
        origin,
        max_distance_km: args.radius.unwrap_or(config.default_radius_km),
        sort: args.sort,
        page_number: args.page,
        page_size: args.page_size.unwrap_or(config.page_size),
    };

    let listings = repo
        .load_approved()
        .await
        .context("Failed to load listings")?;
    info!("Searching {} approved listings", listings.len());

    let result = query::execute(&listings, &params).context("Search failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_page(&result, params.page_number);
    }
    Ok(())
}

fn print_page(result: &QueryPage, page_number: usize) {
    info!(
        "✅ {} matching listings, page {} of {}",
        result.total_count,
        page_number,
        result.total_pages.max(1)
    );

    for (i, item) in result.page.iter().enumerate() {
        let l = &item.listing;
        println!("{}. {} ({} / month)", i + 1, l.title, display_price(l));
        println!("   {} · {} · guests: {}", l.category, l.location, l.allowed_guest);
        if l.rating > 0.0 {
            println!("   Rating: {:.1}", l.rating);
        } else {
            println!("   Rating: New");
        }
        if let Some(distance) = item.distance_km {
            println!("   Distance: {:.1} km", distance);
        }
        if !l.amenities.is_empty() {
            println!("   Amenities: {}", l.amenities.join(", "));
        }
        println!("   ID: {}", l.id);
        println!();
    }
}

fn display_price(listing: &Listing) -> String {
    if listing.price_label.is_empty() {
        format!("₹{}", listing.price_value)
    } else {
        listing.price_label.clone()
    }
}

pub async fn submit(repo: &dyn ListingRepository, args: SubmitArgs) -> Result<()> {
    let new_listing = NewListing {
        title: args.title,
        category: args.category,
        location: args.location,
        price_value: args.price,
        description: args.description,
        main_image: args.image,
        amenities: args.amenities,
        allowed_guest: args.guest,
        coordinates: args.at,
        owner_id: args.owner,
    };

    let listing = moderation::submit(repo, new_listing)
        .await
        .context("Failed to submit listing")?;
    println!("Submitted {} for review", listing.id);
    Ok(())
}

pub async fn pending(repo: &dyn ListingRepository) -> Result<()> {
    let listings = moderation::pending(repo).await?;
    if listings.is_empty() {
        println!("No pending submissions");
        return Ok(());
    }

    println!("Pending Approvals ({})", listings.len());
    for l in &listings {
        println!(
            "- {} | {} | {} | {} | submitted {}",
            l.id,
            l.title,
            l.category,
            display_price(l),
            l.submitted_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub async fn approve(repo: &dyn ListingRepository, id: &str) -> Result<()> {
    let listing = moderation::approve(repo, id)
        .await
        .with_context(|| format!("Failed to approve {id}"))?;
    println!("Approved {} ({})", listing.id, listing.title);
    Ok(())
}

pub async fn reject(repo: &dyn ListingRepository, id: &str) -> Result<()> {
    let listing = moderation::reject(repo, id)
        .await
        .with_context(|| format!("Failed to reject {id}"))?;
    println!("Rejected {} ({})", listing.id, listing.title);
    Ok(())
}

pub async fn favorite(store: &dyn FavoriteStore, user: &str, id: &str) -> Result<()> {
    let saved = favorites::toggle_favorite(store, user, id)
        .await
        .context("Failed to update favorites")?;
    if saved {
        println!("Saved {id}");
    } else {
        println!("Removed {id} from favorites");
    }
    Ok(())
}

pub async fn saved(store: &dyn FavoriteStore, repo: &dyn ListingRepository, user: &str) -> Result<()> {
    let listings = favorites::saved_listings(store, repo, user)
        .await
        .context("Failed to load saved listings")?;
    if listings.is_empty() {
        println!("No saved listings");
        return Ok(());
    }

    for (i, l) in listings.iter().enumerate() {
        println!("{}. {} ({} / month) · {}", i + 1, l.title, display_price(l), l.location);
        println!("   ID: {}", l.id);
    }
    Ok(())
}
