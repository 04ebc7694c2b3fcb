//! # dc-content-static
//! derm-centre/crates/dc-plugins/dc-content-static/src/lib.rs
//! In-memory implementation of `ContentRepo` backed by the clinic's fixed content.

mod fixtures;

use async_trait::async_trait;
use dc_core::models::{
    BlogPost, ClinicInfo, Department, Doctor, Faq, GalleryItem, RecordId, Service, Treatment,
};
use dc_core::traits::ContentRepo;

/// Site content held in memory for the life of the process.
#[derive(Debug, Clone)]
pub struct StaticContent {
    posts: Vec<BlogPost>,
    gallery: Vec<GalleryItem>,
    doctors: Vec<Doctor>,
    services: Vec<Service>,
    treatments: Vec<Treatment>,
    clinic: ClinicInfo,
    departments: Vec<Department>,
    faqs: Vec<Faq>,
}

impl StaticContent {
    pub fn new() -> Self {
        let content = Self {
            posts: fixtures::blog_posts(),
            gallery: fixtures::gallery_items(),
            doctors: fixtures::doctors(),
            services: fixtures::services(),
            treatments: fixtures::treatments(),
            clinic: fixtures::clinic(),
            departments: fixtures::departments(),
            faqs: fixtures::faqs(),
        };
        tracing::debug!(
            posts = content.posts.len(),
            gallery = content.gallery.len(),
            doctors = content.doctors.len(),
            "Static content loaded"
        );
        content
    }
}

impl Default for StaticContent {
    fn default() -> Self {
        Self::new()
    }
}

fn find<T: Clone>(items: &[T], id: RecordId, key: impl Fn(&T) -> RecordId) -> Option<T> {
    items.iter().find(|item| key(item) == id).cloned()
}

#[async_trait]
impl ContentRepo for StaticContent {
    async fn list_posts(&self) -> anyhow::Result<Vec<BlogPost>> {
        Ok(self.posts.clone())
    }

    async fn get_post(&self, id: RecordId) -> anyhow::Result<Option<BlogPost>> {
        Ok(find(&self.posts, id, |p| p.id))
    }

    async fn list_gallery(&self) -> anyhow::Result<Vec<GalleryItem>> {
        Ok(self.gallery.clone())
    }

    async fn get_gallery_item(&self, id: RecordId) -> anyhow::Result<Option<GalleryItem>> {
        Ok(find(&self.gallery, id, |g| g.id))
    }

    async fn list_doctors(&self) -> anyhow::Result<Vec<Doctor>> {
        Ok(self.doctors.clone())
    }

    async fn get_doctor(&self, id: RecordId) -> anyhow::Result<Option<Doctor>> {
        Ok(find(&self.doctors, id, |d| d.id))
    }

    async fn list_services(&self) -> anyhow::Result<Vec<Service>> {
        Ok(self.services.clone())
    }

    async fn get_service(&self, id: RecordId) -> anyhow::Result<Option<Service>> {
        Ok(find(&self.services, id, |s| s.id))
    }

    async fn list_treatments(&self) -> anyhow::Result<Vec<Treatment>> {
        Ok(self.treatments.clone())
    }

    async fn clinic(&self) -> anyhow::Result<ClinicInfo> {
        Ok(self.clinic.clone())
    }

    async fn departments(&self) -> anyhow::Result<Vec<Department>> {
        Ok(self.departments.clone())
    }

    async fn faqs(&self) -> anyhow::Result<Vec<Faq>> {
        Ok(self.faqs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_core::models::{BlogCategory, GalleryCategory};
    use dc_core::query::{evaluate, Query};
    use std::collections::HashSet;

    #[tokio::test]
    async fn ids_are_unique_per_collection() {
        let content = StaticContent::new();
        let posts = content.list_posts().await.unwrap();
        let gallery = content.list_gallery().await.unwrap();
        assert_eq!(posts.len(), 6);
        assert_eq!(gallery.len(), 8);
        assert_eq!(posts.iter().map(|p| p.id).collect::<HashSet<_>>().len(), posts.len());
        assert_eq!(gallery.iter().map(|g| g.id).collect::<HashSet<_>>().len(), gallery.len());
    }

    #[tokio::test]
    async fn lookups_by_id() {
        let content = StaticContent::new();
        let doctor = content.get_doctor(RecordId(2)).await.unwrap().unwrap();
        assert_eq!(doctor.name, "Dr. Michael Chen");
        assert_eq!(doctor.price, 400);
        let service = content.get_service(RecordId(3)).await.unwrap().unwrap();
        assert_eq!(service.duration_minutes, 60);
        assert!(content.get_post(RecordId(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blog_acne_search_finds_the_acne_guide() {
        let posts = StaticContent::new().list_posts().await.unwrap();
        let query: Query<BlogCategory> = Query::from_params(Some("acne"), None, Some("recent"));
        let ids: Vec<u32> = evaluate(&posts, &query).iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3]);
    }

    #[tokio::test]
    async fn gallery_hair_by_likes() {
        let gallery = StaticContent::new().list_gallery().await.unwrap();
        let query: Query<GalleryCategory> = Query::from_params(None, Some("hair"), Some("popular"));
        let ids: Vec<u32> = evaluate(&gallery, &query).iter().map(|g| g.id.0).collect();
        assert_eq!(ids, vec![2, 8]);
    }

    #[tokio::test]
    async fn treatment_slugs_match_sitemap() {
        let treatments = StaticContent::new().list_treatments().await.unwrap();
        for treatment in treatments {
            let route = format!("/treatments/{}", treatment.slug);
            assert!(dc_core::seo::SITEMAP_ROUTES.contains(&route.as_str()), "{route}");
        }
    }
}
