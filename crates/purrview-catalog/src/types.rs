// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upstream catalog payloads.
//!
//! Every field is optional on the wire. Conversion into the domain types
//! replaces missing or `null` values with `0` and `""`.

use purrview_core::{BreedImage, BreedRecord};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawImage {
    pub id: Option<String>,
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<RawImage> for BreedImage {
    fn from(raw: RawImage) -> Self {
        BreedImage {
            id: raw.id.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            width: raw.width.unwrap_or_default(),
            height: raw.height.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawBreed {
    pub id: Option<String>,
    pub name: Option<String>,
    pub temperament: Option<String>,
    pub origin: Option<String>,
    pub description: Option<String>,
    pub life_span: Option<String>,
    pub wikipedia_url: Option<String>,
    pub reference_image_id: Option<String>,
    pub adaptability: Option<u32>,
    pub affection_level: Option<u32>,
    pub child_friendly: Option<u32>,
    pub dog_friendly: Option<u32>,
    pub energy_level: Option<u32>,
    pub grooming: Option<u32>,
    pub health_issues: Option<u32>,
    pub intelligence: Option<u32>,
    pub shedding_level: Option<u32>,
    pub social_needs: Option<u32>,
    pub stranger_friendly: Option<u32>,
    pub vocalisation: Option<u32>,
    pub experimental: Option<u32>,
    pub hairless: Option<u32>,
    pub natural: Option<u32>,
    pub rare: Option<u32>,
    pub rex: Option<u32>,
    pub suppressed_tail: Option<u32>,
    pub short_legs: Option<u32>,
    pub hypoallergenic: Option<u32>,
    pub image: Option<RawImage>,
}

impl From<RawBreed> for BreedRecord {
    fn from(raw: RawBreed) -> Self {
        BreedRecord {
            id: raw.id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            temperament: raw.temperament.unwrap_or_default(),
            origin: raw.origin.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            life_span: raw.life_span.unwrap_or_default(),
            wikipedia_url: raw.wikipedia_url.unwrap_or_default(),
            reference_image_id: raw.reference_image_id.unwrap_or_default(),
            adaptability: raw.adaptability.unwrap_or_default(),
            affection_level: raw.affection_level.unwrap_or_default(),
            child_friendly: raw.child_friendly.unwrap_or_default(),
            dog_friendly: raw.dog_friendly.unwrap_or_default(),
            energy_level: raw.energy_level.unwrap_or_default(),
            grooming: raw.grooming.unwrap_or_default(),
            health_issues: raw.health_issues.unwrap_or_default(),
            intelligence: raw.intelligence.unwrap_or_default(),
            shedding_level: raw.shedding_level.unwrap_or_default(),
            social_needs: raw.social_needs.unwrap_or_default(),
            stranger_friendly: raw.stranger_friendly.unwrap_or_default(),
            vocalisation: raw.vocalisation.unwrap_or_default(),
            experimental: raw.experimental.unwrap_or_default(),
            hairless: raw.hairless.unwrap_or_default(),
            natural: raw.natural.unwrap_or_default(),
            rare: raw.rare.unwrap_or_default(),
            rex: raw.rex.unwrap_or_default(),
            suppressed_tail: raw.suppressed_tail.unwrap_or_default(),
            short_legs: raw.short_legs.unwrap_or_default(),
            hypoallergenic: raw.hypoallergenic.unwrap_or_default(),
            image: raw.image.map(BreedImage::from),
        }
    }
}
