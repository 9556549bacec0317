// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Breed detail with its image gallery.

use purrview_core::{ApiError, BreedImage, BreedRecord, CatalogBackend};
use tracing::{debug, warn};

/// Where a gallery's images came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GallerySource {
    /// The image search endpoint.
    ImageSearch,
    /// The breed's own representative image, after the image search failed
    /// or came back empty.
    Representative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gallery {
    pub breed: BreedRecord,
    pub images: Vec<BreedImage>,
    pub source: GallerySource,
}

/// Loads `breed_id` and its images.
///
/// Only a failed breed lookup is an error. A failed or empty image search
/// falls back to the breed's representative image, which may itself be
/// absent.
pub async fn load_gallery(
    backend: &dyn CatalogBackend,
    breed_id: &str,
) -> Result<Gallery, ApiError> {
    let breed = backend.breed(breed_id).await?;

    match backend.breed_images(breed_id).await {
        Ok(images) if !images.is_empty() => {
            debug!(breed_id, count = images.len(), "gallery images loaded");
            return Ok(Gallery {
                breed,
                images,
                source: GallerySource::ImageSearch,
            });
        }
        Ok(_) => debug!(breed_id, "image search returned nothing"),
        Err(e) => {
            warn!(breed_id, error = %e, "image search failed, using representative image");
        }
    }

    let images = breed.image.clone().into_iter().collect();
    Ok(Gallery {
        breed,
        images,
        source: GallerySource::Representative,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogClient;
    use purrview_config::model::CatalogConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with_breed() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/breeds/beng"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "beng", "name": "Bengal",
                "image": { "id": "rep", "url": "https://cdn/rep.jpg", "width": 10, "height": 10 }
            })))
            .mount(&server)
            .await;
        server
    }

    fn client(server: &MockServer) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: server.uri(),
            ..CatalogConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn images_from_search() {
        let server = server_with_breed().await;
        Mock::given(method("GET"))
            .and(path("/images/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "a", "url": "https://cdn/a.jpg", "width": 1, "height": 1 },
                { "id": "b", "url": "https://cdn/b.jpg", "width": 1, "height": 1 }
            ])))
            .mount(&server)
            .await;

        let gallery = load_gallery(&client(&server), "beng").await.unwrap();
        assert_eq!(gallery.source, GallerySource::ImageSearch);
        assert_eq!(gallery.images.len(), 2);
        assert_eq!(gallery.breed.name, "Bengal");
    }

    #[tokio::test]
    async fn failed_image_search_falls_back() {
        let server = server_with_breed().await;
        Mock::given(method("GET"))
            .and(path("/images/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let gallery = load_gallery(&client(&server), "beng").await.unwrap();
        assert_eq!(gallery.source, GallerySource::Representative);
        assert_eq!(gallery.images.len(), 1);
        assert_eq!(gallery.images[0].id, "rep");
    }

    #[tokio::test]
    async fn missing_breed_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = load_gallery(&client(&server), "nope").await.unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }
}
