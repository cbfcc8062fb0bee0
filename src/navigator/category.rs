// src/navigator/category.rs
use super::outline::strip_category_prefix;
use super::{keys, Navigator};
use crate::api::ApiParams;
use crate::constants::{CATEGORY_PREFIX, PARENT_CATEGORY_LIMIT};
use crate::error::WikiError;
use crate::model::{CategoryMember, CategoryResponse, MemberKind};
use crate::types::{clamp_limit, require_title, WikiUrl};
use std::sync::Arc;

impl Navigator {
    /// Up to `limit` members of a category and the categories it belongs to.
    ///
    /// The category may be named with or without its `Category:` prefix.
    /// Parent categories are best-effort and come back empty on failure.
    pub async fn category(
        &self,
        wiki: &WikiUrl,
        category: &str,
        limit: u32,
    ) -> Result<Arc<CategoryResponse>, WikiError> {
        let name = require_title(category, "category")?;
        let full_name = if name.starts_with(CATEGORY_PREFIX) {
            name.to_string()
        } else {
            format!("{}{}", CATEGORY_PREFIX, name)
        };
        let limit = clamp_limit(limit);
        let key = keys::category(wiki, &full_name, limit);
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }

        let listing = self
            .api
            .request(
                wiki,
                ApiParams::query()
                    .set("list", "categorymembers")
                    .set("cmtitle", &full_name)
                    .set("cmlimit", limit)
                    .set("cmprop", "title|type"),
            )
            .await?
            .into_query()?;

        let members: Vec<CategoryMember> = listing
            .categorymembers
            .into_iter()
            .map(|member| CategoryMember {
                kind: MemberKind::classify(member.member_type.as_deref(), member.ns),
                title: member.title,
            })
            .collect();

        let parent_categories = match self.fetch_parent_categories(wiki, &full_name).await {
            Ok(parents) => parents,
            Err(WikiError::Cancelled) => return Err(WikiError::Cancelled),
            Err(e) => {
                log::warn!("Omitting parent categories of {:?}: {}", full_name, e);
                Vec::new()
            }
        };

        let response = CategoryResponse {
            category: strip_category_prefix(&full_name),
            total_members: members.len(),
            members,
            parent_categories,
        };
        Ok(self.store(key, response, self.ttl.content))
    }

    async fn fetch_parent_categories(
        &self,
        wiki: &WikiUrl,
        full_name: &str,
    ) -> Result<Vec<String>, WikiError> {
        let query = self
            .api
            .request(
                wiki,
                ApiParams::query()
                    .set("titles", full_name)
                    .set("prop", "categories")
                    .set("cllimit", PARENT_CATEGORY_LIMIT),
            )
            .await?
            .into_query()?;

        Ok(query
            .pages
            .map(|pages| pages.into_vec())
            .unwrap_or_default()
            .into_iter()
            .flat_map(|page| page.categories)
            .map(|category| strip_category_prefix(&category.title))
            .collect())
    }
}
