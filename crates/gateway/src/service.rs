//! The gateway service

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use core_kernel::{
    apply_listing, ClaimId, CoreError, HealthCheckResult, ItemId, OperationMetadata, Session,
};
use domain_access::{
    ClaimSortField, ClaimView, ItemSortField, PublicItemDetail, PublicItemView, StaffItemSummary,
    StaffItemView, VisibilityPolicy,
};
use domain_claims::{
    Claim, ClaimAmendment, ClaimError, ClaimLifecycle, ClaimPort, ClaimQuery, NewClaim,
    PickupCompletion, Review,
};
use domain_items::{FoundItem, FoundItemPort, FoundItemUpdate, ItemError, ItemQuery, NewFoundItem};

use crate::options::ListOptions;

/// Item and claim operations for a given session
#[derive(Clone)]
pub struct LostFoundGateway {
    items: Arc<dyn FoundItemPort>,
    claims: Arc<dyn ClaimPort>,
}

impl LostFoundGateway {
    pub fn new(items: Arc<dyn FoundItemPort>, claims: Arc<dyn ClaimPort>) -> Self {
        Self { items, claims }
    }

    // ------------------------------------------------------------------
    // Found items
    // ------------------------------------------------------------------

    /// Browsable items without staff-only fields
    ///
    /// DONATED/DISPOSED items and items with a picked-up claim are left out.
    #[instrument(skip(self, session, options), fields(query = %options.query))]
    pub async fn list_public_items(
        &self,
        session: &Session,
        options: &ListOptions<ItemSortField>,
    ) -> Result<Vec<PublicItemView>, CoreError> {
        let meta = Self::metadata(session, "list_public_items");
        let items = self.items.find_items(ItemQuery::publicly_listed(), meta.clone()).await?;
        let picked_up = self.claims.find_claims(ClaimQuery::picked_up(), meta).await?;

        let views: Vec<PublicItemView> = items
            .iter()
            .filter(|item| VisibilityPolicy::is_browsable(item, &picked_up))
            .map(PublicItemView::from)
            .collect();

        Ok(apply_listing(&views, &options.query, options.sort))
    }

    /// A single browsable item, with the calls to action for this session
    ///
    /// # Errors
    ///
    /// `NotFound` if the item does not exist or is no longer browsable.
    #[instrument(skip(self, session), fields(item_id = %id))]
    pub async fn get_public_item(&self, session: &Session, id: ItemId) -> Result<PublicItemDetail, CoreError> {
        let meta = Self::metadata(session, "get_public_item");
        let item = self.items.get_item(id, meta.clone()).await?;
        let claims = self.claims.find_claims(ClaimQuery::for_item(id), meta).await?;

        if !VisibilityPolicy::is_browsable(&item, &claims) {
            return Err(ItemError::NoLongerAvailable(id.to_string()).into());
        }

        let my_claim = session
            .user_id()
            .and_then(|user_id| claims.iter().find(|claim| claim.is_owned_by(user_id)));
        Ok(PublicItemDetail::new(&item, session, my_claim))
    }

    /// Staff dashboard rows: full records with claim counts
    ///
    /// The same browse exclusion as the public list applies, so searching by
    /// status separates FOUND from CLAIMED only. Donated, disposed and
    /// picked-up items are reached through [`Self::get_staff_item`].
    #[instrument(skip(self, session, options), fields(query = %options.query))]
    pub async fn list_staff_items(
        &self,
        session: &Session,
        options: &ListOptions<ItemSortField>,
    ) -> Result<Vec<StaffItemSummary>, CoreError> {
        VisibilityPolicy::require_staff(session)?;
        let meta = Self::metadata(session, "list_staff_items");
        let items = self.items.find_items(ItemQuery::publicly_listed(), meta.clone()).await?;
        let claims = self.claims.find_claims(ClaimQuery::all(), meta).await?;

        let rows: Vec<StaffItemSummary> = items
            .into_iter()
            .filter(|item| VisibilityPolicy::is_browsable(item, &claims))
            .map(|item| StaffItemSummary::new(item, &claims))
            .collect();

        Ok(apply_listing(&rows, &options.query, options.sort))
    }

    /// Any item by id, including retired and picked-up ones
    #[instrument(skip(self, session), fields(item_id = %id))]
    pub async fn get_staff_item(&self, session: &Session, id: ItemId) -> Result<StaffItemView, CoreError> {
        VisibilityPolicy::require_staff(session)?;
        let meta = Self::metadata(session, "get_staff_item");
        let item = self.items.get_item(id, meta.clone()).await?;
        let claims = self.claims.find_claims(ClaimQuery::for_item(id), meta).await?;
        Ok(StaffItemView::new(item, &claims))
    }

    #[instrument(skip(self, session, new_item))]
    pub async fn create_item(&self, session: &Session, new_item: NewFoundItem) -> Result<StaffItemView, CoreError> {
        let actor = VisibilityPolicy::require_staff(session)?;
        let item = FoundItem::log(new_item, actor.id)?;

        self.items
            .insert_item(&item, Self::metadata(session, "create_item"))
            .await?;

        info!(item_id = %item.id, by = %session.audit_name(), "Found item logged");
        Ok(StaffItemView::new(item, &[]))
    }

    #[instrument(skip(self, session, update), fields(item_id = %id))]
    pub async fn update_item(
        &self,
        session: &Session,
        id: ItemId,
        update: FoundItemUpdate,
    ) -> Result<StaffItemView, CoreError> {
        VisibilityPolicy::require_staff(session)?;
        let meta = Self::metadata(session, "update_item");
        let mut item = self.items.get_item(id, meta.clone()).await?;

        item.apply_update(update)?;
        self.items.save_item(&item, meta.clone()).await?;

        info!(item_id = %item.id, status = %item.status, by = %session.audit_name(), "Found item updated");
        let claims = self.claims.find_claims(ClaimQuery::for_item(id), meta).await?;
        Ok(StaffItemView::new(item, &claims))
    }

    /// Deletes the item together with every claim filed against it
    ///
    /// The item goes first, so a failed delete leaves its claims in place.
    #[instrument(skip(self, session), fields(item_id = %id))]
    pub async fn delete_item(&self, session: &Session, id: ItemId) -> Result<FoundItem, CoreError> {
        VisibilityPolicy::require_staff(session)?;
        let meta = Self::metadata(session, "delete_item");

        let removed = self.items.delete_item(id, meta.clone()).await?;
        let claims_removed = self.claims.delete_claims_for_item(id, meta).await?;

        info!(
            item_id = %id,
            claims_removed,
            by = %session.audit_name(),
            "Found item deleted"
        );
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Claims
    // ------------------------------------------------------------------

    /// Staff see every claim, visitors their own
    #[instrument(skip(self, session, options), fields(query = %options.query))]
    pub async fn list_claims(
        &self,
        session: &Session,
        options: &ListOptions<ClaimSortField>,
    ) -> Result<Vec<ClaimView>, CoreError> {
        let actor = VisibilityPolicy::require_authenticated(session)?;
        let meta = Self::metadata(session, "list_claims");
        let query = if session.is_staff() {
            ClaimQuery::all()
        } else {
            ClaimQuery::by_claimant(actor.id)
        };

        let claims = self.claims.find_claims(query, meta.clone()).await?;
        let items: HashMap<ItemId, FoundItem> = self
            .items
            .find_items(ItemQuery::all(), meta)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        let views: Vec<ClaimView> = claims
            .into_iter()
            .filter(|claim| VisibilityPolicy::can_view_claim(session, claim))
            .map(|claim| {
                let item = items.get(&claim.item_id);
                ClaimView::new(claim, item, session)
            })
            .collect();

        Ok(apply_listing(&views, &options.query, options.sort))
    }

    /// # Errors
    ///
    /// `Authorization` when a visitor asks for someone else's claim.
    #[instrument(skip(self, session), fields(claim_id = %id))]
    pub async fn get_claim(&self, session: &Session, id: ClaimId) -> Result<ClaimView, CoreError> {
        VisibilityPolicy::require_authenticated(session)?;
        let meta = Self::metadata(session, "get_claim");
        let claim = self.claims.get_claim(id, meta.clone()).await?;
        Self::ensure_visible(session, &claim)?;

        let item = self.find_item(claim.item_id, meta).await?;
        Ok(ClaimView::new(claim, item.as_ref(), session))
    }

    /// Files a PENDING claim; one per visitor per item
    #[instrument(skip(self, session, new_claim), fields(item_id = %new_claim.item_id))]
    pub async fn create_claim(&self, session: &Session, new_claim: NewClaim) -> Result<ClaimView, CoreError> {
        let actor = VisibilityPolicy::require_visitor(session)?;
        let meta = Self::metadata(session, "create_claim");
        let item = self.items.get_item(new_claim.item_id, meta.clone()).await?;
        let item_claims = self.claims.find_claims(ClaimQuery::for_item(item.id), meta.clone()).await?;

        if !VisibilityPolicy::is_browsable(&item, &item_claims) {
            return Err(ItemError::NoLongerAvailable(item.id.to_string()).into());
        }
        let holds_claim = item_claims.iter().any(|claim| claim.is_owned_by(actor.id));
        if !VisibilityPolicy::can_file_claim(session, holds_claim) {
            return Err(ClaimError::DuplicateClaim(item.id.to_string()).into());
        }

        let claim = Claim::file(new_claim, actor, &item.question_texts())?;
        self.claims.insert_claim(&claim, meta).await?;

        info!(claim_id = %claim.id, item_id = %item.id, by = %session.audit_name(), "Claim filed");
        Ok(ClaimView::new(claim, Some(&item), session))
    }

    /// Claimant edit of a PENDING claim
    #[instrument(skip(self, session, amendment), fields(claim_id = %id))]
    pub async fn update_claim(
        &self,
        session: &Session,
        id: ClaimId,
        amendment: ClaimAmendment,
    ) -> Result<ClaimView, CoreError> {
        VisibilityPolicy::require_authenticated(session)?;
        let meta = Self::metadata(session, "update_claim");
        let mut claim = self.claims.get_claim(id, meta.clone()).await?;
        Self::ensure_visible(session, &claim)?;

        let item = self.items.get_item(claim.item_id, meta.clone()).await?;
        ClaimLifecycle::amend(&mut claim, session, amendment, &item.question_texts())?;
        self.claims.save_claim(&claim, meta).await?;

        info!(claim_id = %claim.id, by = %session.audit_name(), "Claim amended");
        Ok(ClaimView::new(claim, Some(&item), session))
    }

    /// Staff decision; previous notes are replaced and the change is logged
    #[instrument(skip(self, session, review), fields(claim_id = %id))]
    pub async fn review_claim(&self, session: &Session, id: ClaimId, review: Review) -> Result<ClaimView, CoreError> {
        VisibilityPolicy::require_staff(session)?;
        let meta = Self::metadata(session, "review_claim");
        let mut claim = self.claims.get_claim(id, meta.clone()).await?;
        let previous = claim.status;

        ClaimLifecycle::review(&mut claim, session, review)?;
        self.claims.save_claim(&claim, meta.clone()).await?;

        info!(
            target: "audit",
            claim_id = %claim.id,
            reviewer = %session.audit_name(),
            from = %previous,
            to = %claim.status,
            notes = claim.review_notes.as_deref().unwrap_or_default(),
            "Claim reviewed"
        );

        let item = self.find_item(claim.item_id, meta).await?;
        Ok(ClaimView::new(claim, item.as_ref(), session))
    }

    /// Records pickup of an APPROVED claim; the item leaves public browsing
    #[instrument(skip(self, session, completion), fields(claim_id = %id))]
    pub async fn complete_pickup(
        &self,
        session: &Session,
        id: ClaimId,
        completion: PickupCompletion,
    ) -> Result<ClaimView, CoreError> {
        VisibilityPolicy::require_staff(session)?;
        let meta = Self::metadata(session, "complete_pickup");
        let mut claim = self.claims.get_claim(id, meta.clone()).await?;

        ClaimLifecycle::complete_pickup(&mut claim, session, completion)?;
        self.claims.save_claim(&claim, meta.clone()).await?;

        if let Some(pickup) = &claim.pickup {
            info!(
                target: "audit",
                claim_id = %claim.id,
                item_id = %claim.item_id,
                verification = %pickup.verification_type,
                by = %session.audit_name(),
                "Pickup completed"
            );
        }

        let item = self.find_item(claim.item_id, meta).await?;
        Ok(ClaimView::new(claim, item.as_ref(), session))
    }

    #[instrument(skip(self, session), fields(claim_id = %id))]
    pub async fn delete_claim(&self, session: &Session, id: ClaimId) -> Result<Claim, CoreError> {
        VisibilityPolicy::require_staff(session)?;
        let removed = self
            .claims
            .delete_claim(id, Self::metadata(session, "delete_claim"))
            .await?;

        info!(claim_id = %id, by = %session.audit_name(), "Claim deleted");
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Health
    // ------------------------------------------------------------------

    /// Health of both storage ports
    pub async fn health(&self) -> Vec<HealthCheckResult> {
        vec![self.items.health_check().await, self.claims.health_check().await]
    }

    // ------------------------------------------------------------------

    fn metadata(session: &Session, operation: &str) -> Option<OperationMetadata> {
        Some(
            OperationMetadata::with_correlation_id(Uuid::now_v7().to_string())
                .initiated_by(session.audit_name())
                .with_context("operation", operation),
        )
    }

    fn ensure_visible(session: &Session, claim: &Claim) -> Result<(), CoreError> {
        if VisibilityPolicy::can_view_claim(session, claim) {
            Ok(())
        } else {
            Err(CoreError::authorization("This claim belongs to another user"))
        }
    }

    /// Item lookup where a removed item is not an error
    async fn find_item(
        &self,
        id: ItemId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<FoundItem>, CoreError> {
        match self.items.get_item(id, metadata).await {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
