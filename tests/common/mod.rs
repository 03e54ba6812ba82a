//! In-memory engine with a local image store and a remote registry

#![allow(dead_code)]

use async_trait::async_trait;
use docker_repo_cp::{CopyError, EngineImage, ImageEngine, ImageHandle, Result};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct State {
    pub local: Vec<EngineImage>,
    /// repository -> (tag, image id)
    pub remote: BTreeMap<String, Vec<(String, String)>>,
    pub calls: Vec<String>,
    /// Replaces the push response when set; nothing reaches the remote then
    pub push_log: Option<String>,
    pub fail_remove: HashSet<String>,
    /// Pull fills the local store and then never completes
    pub hang_pull: bool,
}

#[derive(Default)]
pub struct FakeEngine {
    pub state: Mutex<State>,
}

fn repository_of(reference: &str) -> &str {
    reference.rsplit_once(':').map_or(reference, |(repo, _)| repo)
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local(self, id: &str, tags: &[&str]) -> Self {
        self.state.lock().unwrap().local.push(EngineImage {
            id: id.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        });
        self
    }

    pub fn with_remote(self, repository: &str, tag: &str, id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .remote
            .entry(repository.to_string())
            .or_default()
            .push((tag.to_string(), id.to_string()));
        self
    }

    pub fn with_push_log(self, log: &str) -> Self {
        self.state.lock().unwrap().push_log = Some(log.to_string());
        self
    }

    pub fn hanging_pull(self) -> Self {
        self.state.lock().unwrap().hang_pull = true;
        self
    }

    pub fn failing_remove(self, reference: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .fail_remove
            .insert(reference.to_string());
        self
    }

    pub fn local_tags(&self) -> BTreeSet<String> {
        self.state
            .lock()
            .unwrap()
            .local
            .iter()
            .flat_map(|image| image.tags.iter().cloned())
            .collect()
    }

    pub fn remote_tags(&self, repository: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .remote
            .get(repository)
            .map(|tags| tags.iter().map(|(tag, _)| tag.clone()).collect())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn list(state: &State, name: Option<&str>) -> Vec<EngineImage> {
        state
            .local
            .iter()
            .filter(|image| match name {
                Some(name) => image.tags.iter().any(|t| repository_of(t) == name),
                None => true,
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ImageEngine for FakeEngine {
    async fn list_images(&self, name: Option<&str>) -> Result<Vec<EngineImage>> {
        let state = self.state.lock().unwrap();
        Ok(Self::list(&state, name))
    }

    async fn pull_all_tags(&self, repository: &str) -> Result<Vec<EngineImage>> {
        let (pulled, hang) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(format!("pull {}", repository));

            let Some(remote) = state.remote.get(repository).cloned() else {
                return Err(CopyError::Engine(format!("repository {} not found", repository)));
            };
            for (tag, id) in remote {
                let reference = format!("{}:{}", repository, tag);
                match state.local.iter_mut().find(|image| image.id == id) {
                    Some(image) => {
                        if !image.tags.contains(&reference) {
                            image.tags.push(reference);
                        }
                    }
                    None => state.local.push(EngineImage {
                        id,
                        tags: vec![reference],
                    }),
                }
            }
            (Self::list(&state, Some(repository)), state.hang_pull)
        };

        if hang {
            std::future::pending::<()>().await;
        }
        Ok(pulled)
    }

    async fn tag_image(&self, image: &ImageHandle, repository: &str, tag: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let reference = format!("{}:{}", repository, tag);
        state.calls.push(format!("tag {} {}", image.as_str(), reference));

        if !state.local.iter().any(|i| i.id == image.as_str()) {
            return Err(CopyError::Engine(format!("no such image: {}", image.as_str())));
        }
        for local in state.local.iter_mut() {
            if local.id == image.as_str() {
                if !local.tags.contains(&reference) {
                    local.tags.push(reference.clone());
                }
            } else {
                local.tags.retain(|t| t != &reference);
            }
        }
        Ok(())
    }

    async fn push_repository(&self, repository: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("push {}", repository));

        if let Some(log) = state.push_log.clone() {
            return Ok(log);
        }

        let mut lines = vec![format!(
            "{{\"status\":\"The push refers to repository [{}]\"}}",
            repository
        )];
        let pushed: Vec<(String, String)> = state
            .local
            .iter()
            .flat_map(|image| {
                image
                    .tags
                    .iter()
                    .filter(|t| repository_of(t) == repository)
                    .filter_map(|t| t.rsplit_once(':'))
                    .map(|(_, tag)| (tag.to_string(), image.id.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        for (tag, id) in &pushed {
            lines.push(format!("{{\"status\":\"{}: digest: {} size: 528\"}}", tag, id));
        }
        state
            .remote
            .entry(repository.to_string())
            .or_default()
            .extend(pushed);

        Ok(lines.join("\n"))
    }

    async fn remove_image(&self, reference: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("remove {}", reference));

        if state.fail_remove.contains(reference) {
            return Err(CopyError::Engine(format!("conflict removing {}", reference)));
        }
        for image in state.local.iter_mut() {
            image.tags.retain(|t| t != reference);
        }
        state.local.retain(|image| !image.tags.is_empty());
        Ok(())
    }
}
