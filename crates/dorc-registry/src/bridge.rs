//! Bridge between dorc-core's `TagRegistry` trait and the concrete
//! `DigitalOceanClient` in this crate.

use crate::registry::DigitalOceanClient;
use dorc_core::{RegistryFuture, Tag, TagRegistry};

impl TagRegistry for DigitalOceanClient {
    fn list_tags<'a>(
        &'a self,
        registry: &'a str,
        repository: &'a str,
    ) -> RegistryFuture<'a, Vec<Tag>> {
        Box::pin(async move { Ok(DigitalOceanClient::list_tags(self, registry, repository).await?) })
    }

    fn delete_tag<'a>(
        &'a self,
        registry: &'a str,
        repository: &'a str,
        tag: &'a str,
    ) -> RegistryFuture<'a, ()> {
        Box::pin(async move {
            Ok(DigitalOceanClient::delete_tag(self, registry, repository, tag).await?)
        })
    }
}
