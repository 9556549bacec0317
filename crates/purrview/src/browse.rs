// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `purrview breeds`, `search` and `breed`.

use purrview_catalog::{Gallery, GallerySource, PageLink, PageLoad, load_gallery, visible_pages};
use purrview_core::{BreedRecord, PageResult, PurrviewError, TotalSource};
use tracing::warn;

use crate::context::ClientContext;

pub async fn run_breeds(ctx: &ClientContext, page: u32, json: bool) -> Result<(), PurrviewError> {
    ctx.browser.initialize().await;
    let load = ctx.browser.load_page(page).await?;
    print_load(load, json);
    Ok(())
}

pub async fn run_search(
    ctx: &ClientContext,
    query: &str,
    page: u32,
    json: bool,
) -> Result<(), PurrviewError> {
    let load = ctx.browser.search(query, page).await?;
    print_load(load, json);
    Ok(())
}

pub async fn run_breed(ctx: &ClientContext, id: &str, json: bool) -> Result<(), PurrviewError> {
    let gallery = load_gallery(ctx.catalog.as_ref(), id).await?;
    if json {
        let body = serde_json::json!({
            "breed": gallery.breed,
            "images": gallery.images,
            "source": match gallery.source {
                GallerySource::ImageSearch => "image_search",
                GallerySource::Representative => "representative",
            },
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print_gallery(&gallery);
    }
    Ok(())
}

fn print_load(load: PageLoad, json: bool) {
    let Some(result) = load.applied() else {
        warn!("page superseded by a newer request");
        return;
    };
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).unwrap_or_else(|_| "{}".to_string())
        );
        return;
    }

    println!();
    if result.items.is_empty() {
        println!("  No breeds found.");
        println!();
        return;
    }
    for breed in &result.items {
        println!("  {}", breed_line(breed));
    }
    println!();
    println!("  {}", summary_line(&result));
    println!("  {}", render_pager(result.page, result.total_pages));
    println!();
}

fn print_gallery(gallery: &Gallery) {
    let breed = &gallery.breed;
    println!();
    println!("  {} ({})", breed.name, breed.id);
    println!("  {}", "-".repeat(35));
    if !breed.origin.is_empty() {
        println!("    Origin:       {}", breed.origin);
    }
    if !breed.temperament.is_empty() {
        println!("    Temperament:  {}", breed.temperament);
    }
    if !breed.life_span.is_empty() {
        println!("    Life span:    {} years", breed.life_span);
    }
    println!("    Adaptability: {}/5", breed.adaptability);
    println!("    Affection:    {}/5", breed.affection_level);
    println!("    Energy:       {}/5", breed.energy_level);
    if !breed.description.is_empty() {
        println!();
        println!("    {}", breed.description);
    }
    println!();
    match gallery.images.len() {
        0 => println!("  No images available."),
        n => {
            let note = match gallery.source {
                GallerySource::ImageSearch => "",
                GallerySource::Representative => " (representative)",
            };
            println!("  Images ({n}){note}:");
            for image in &gallery.images {
                println!("    {} {}x{}", image.url, image.width, image.height);
            }
        }
    }
    println!();
}

fn breed_line(breed: &BreedRecord) -> String {
    let origin = if breed.origin.is_empty() {
        "unknown origin"
    } else {
        breed.origin.as_str()
    };
    format!("{:<8} {:<28} {}", breed.id, breed.name, origin)
}

fn summary_line(result: &PageResult<BreedRecord>) -> String {
    let total = match result.source {
        TotalSource::Estimated => format!("about {}", result.total),
        TotalSource::Known | TotalSource::Exact => result.total.to_string(),
    };
    format!(
        "Page {} of {} ({total} breeds)",
        result.page, result.total_pages
    )
}

/// One pager line, current page in brackets: `1 2 [3] 4 5 ... 9`.
fn render_pager(current: u32, total_pages: u32) -> String {
    visible_pages(current, total_pages)
        .into_iter()
        .map(|link| match link {
            PageLink::Page(n) if n == current => format!("[{n}]"),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
