//! Bucket edit use-case service.
//!
//! # Responsibility
//! - Provide add/remove entry points for the three task buckets.
//! - Validate entities before they reach the repository.

use crate::model::entities::{Deadline, Item, OfficeWork, Place, Priority};
use crate::repo::bucket_repo::BucketRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service for editing shopping, travel and work buckets.
pub struct BucketService<R: BucketRepository> {
    repo: R,
}

impl<R: BucketRepository> BucketService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_item(
        &mut self,
        user_id: &str,
        item_name: &str,
        quantity: i64,
        unit: &str,
    ) -> RepoResult<()> {
        let item = Item::new(item_name, quantity, unit);
        self.repo.add_item(user_id, &item)?;
        info!("event=bucket_edit module=service bucket=shopping action=add");
        Ok(())
    }

    pub fn remove_item(&mut self, user_id: &str, item_name: &str) -> RepoResult<()> {
        self.repo.remove_item(user_id, item_name)?;
        info!("event=bucket_edit module=service bucket=shopping action=remove");
        Ok(())
    }

    pub fn add_place(
        &mut self,
        user_id: &str,
        city: &str,
        country: &str,
        estimated_cost: f64,
    ) -> RepoResult<()> {
        let place = Place::new(city, country, estimated_cost);
        self.repo.add_place(user_id, &place)?;
        info!("event=bucket_edit module=service bucket=travel action=add");
        Ok(())
    }

    pub fn remove_place(&mut self, user_id: &str, city: &str) -> RepoResult<()> {
        self.repo.remove_place(user_id, city)?;
        info!("event=bucket_edit module=service bucket=travel action=remove");
        Ok(())
    }

    pub fn add_work(
        &mut self,
        user_id: &str,
        work_title: &str,
        priority: Priority,
        deadline: Deadline,
    ) -> RepoResult<()> {
        let work = OfficeWork::new(work_title, priority, deadline);
        self.repo.add_work(user_id, &work)?;
        info!("event=bucket_edit module=service bucket=work action=add");
        Ok(())
    }

    pub fn remove_work(&mut self, user_id: &str, work_title: &str) -> RepoResult<()> {
        self.repo.remove_work(user_id, work_title)?;
        info!("event=bucket_edit module=service bucket=work action=remove");
        Ok(())
    }
}
