//! [`ImageEngine`] backed by the local Docker daemon

use super::{EngineImage, ImageEngine};
use crate::error::{CopyError, Result};
use crate::image::ImageHandle;
use crate::image::reference::registry_host;
use async_trait::async_trait;
use bollard::Docker;
use bollard::auth::DockerCredentials;
use bollard::image::{
    CreateImageOptions, ListImagesOptions, PushImageOptions, RemoveImageOptions, TagImageOptions,
};
use futures_util::StreamExt;
use std::collections::HashMap;

pub struct DockerEngine {
    docker: Docker,
    credentials: Option<(String, String)>,
}

impl DockerEngine {
    pub fn new(docker: Docker) -> Self {
        Self {
            docker,
            credentials: None,
        }
    }

    /// Connects using the local defaults (`DOCKER_HOST` or the default socket).
    pub fn connect() -> Result<Self> {
        Ok(Self::new(Docker::connect_with_local_defaults()?))
    }

    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.credentials = Some((username, password));
        self
    }

    fn credentials_for(&self, repository: &str) -> Option<DockerCredentials> {
        self.credentials.as_ref().map(|(username, password)| DockerCredentials {
            username: Some(username.clone()),
            password: Some(password.clone()),
            serveraddress: Some(registry_host(repository).to_string()),
            ..Default::default()
        })
    }
}

#[async_trait]
impl ImageEngine for DockerEngine {
    async fn list_images(&self, name: Option<&str>) -> Result<Vec<EngineImage>> {
        let mut filters = HashMap::new();
        if let Some(name) = name {
            filters.insert("reference".to_string(), vec![name.to_string()]);
        }

        let options = ListImagesOptions::<String> {
            all: false,
            filters,
            ..Default::default()
        };

        let images = self.docker.list_images(Some(options)).await?;
        Ok(images
            .into_iter()
            .map(|summary| EngineImage {
                id: summary.id,
                tags: summary.repo_tags,
            })
            .collect())
    }

    async fn pull_all_tags(&self, repository: &str) -> Result<Vec<EngineImage>> {
        // An empty tag asks the daemon for every tag of the repository
        let options = CreateImageOptions::<String> {
            from_image: repository.to_string(),
            tag: String::new(),
            ..Default::default()
        };

        let credentials = self.credentials_for(repository);
        let mut stream = self.docker.create_image(Some(options), None, credentials);
        while let Some(info) = stream.next().await {
            let info = info?;
            if let Some(error) = info.error {
                let message = format!("Failed to pull {}: {}", repository, error);
                return Err(CopyError::Engine(message));
            }
        }

        self.list_images(Some(repository)).await
    }

    async fn tag_image(&self, image: &ImageHandle, repository: &str, tag: &str) -> Result<()> {
        let options = TagImageOptions {
            repo: repository,
            tag,
        };
        self.docker.tag_image(image.as_str(), Some(options)).await?;
        Ok(())
    }

    async fn push_repository(&self, repository: &str) -> Result<String> {
        let options = PushImageOptions::<String> { tag: String::new() };

        let mut records = Vec::new();
        let credentials = self.credentials_for(repository);
        let mut stream = self.docker.push_image(repository, Some(options), credentials);
        while let Some(info) = stream.next().await {
            match info {
                Ok(info) => records.push(serde_json::to_string(&info).map_err(|e| {
                    CopyError::Engine(format!("Unreadable push record: {}", e))
                })?),
                // The daemon reports registry failures inside the stream; keep
                // them as records so the caller sees them like any other line.
                Err(bollard::errors::Error::DockerStreamError { error }) => {
                    records.push(serde_json::json!({ "error": error }).to_string());
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(records.join("\n"))
    }

    async fn remove_image(&self, reference: &str) -> Result<()> {
        let options = RemoveImageOptions {
            force: false,
            noprune: false,
        };
        self.docker.remove_image(reference, Some(options), None).await?;
        Ok(())
    }
}
