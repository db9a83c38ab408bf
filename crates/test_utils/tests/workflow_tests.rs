//! Cross-crate workflow tests
//!
//! Drive claims from submission through review into payment reports and
//! analytics. The in-memory scenarios always run; the PostgreSQL ones need
//! Docker and are ignored by default (`cargo test -- --ignored`).

use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::{Currency, HealthCheckable, PortError};
use domain_claims::{
    ApprovalService, ClaimPort, ClaimReviewService, ClaimStatus, ClaimSubmission,
    InMemoryClaimStore, ReviewError, Severity,
};
use domain_hr::{HrPort, HrService, InMemoryHrStore};
use infra_db::{PostgresClaimAdapter, PostgresHrAdapter};
use test_utils::*;

fn review_service(store: Arc<dyn ClaimPort>) -> ClaimReviewService {
    ClaimReviewService::new(store, ApprovalService::default())
}

// ============================================================================
// In-memory Workflow
// ============================================================================

mod in_memory_workflow {
    use super::*;

    #[tokio::test]
    async fn test_submit_review_and_pay() {
        let claims: Arc<dyn ClaimPort> = Arc::new(InMemoryClaimStore::new());
        let reviews = review_service(claims.clone());
        let hr = HrService::new(
            Arc::new(InMemoryHrStore::with_sample_data()),
            claims.clone(),
            TemporalFixtures::utc(),
            Currency::USD,
        );

        let lecturer = ActorFixtures::lecturer("jane.smith");
        let submission = ClaimSubmission {
            document: Some("/uploads/march.pdf".to_string()),
            notes: Some("Tutorials".to_string()),
            ..ClaimSubmission::new(dec!(8), dec!(45))
        };
        let submitted = reviews.submit(&lecturer, submission).await.unwrap();
        assert_eq!(submitted.status, ClaimStatus::Pending);

        let queue = reviews.review_queue(&ActorFixtures::coordinator()).await.unwrap();
        assert_eq!(queue.len(), 1);
        assert!(queue[0].can_approve);
        assert_no_errors(&queue[0].findings);

        let approved = reviews
            .approve(submitted.id, &ActorFixtures::coordinator())
            .await
            .unwrap();
        assert_approved_by(&approved, "p.coordinator");

        let period = core_kernel::DateRange::current_month(hr.timezone(), approved.date);
        let report = hr
            .generate_payment_report(&ActorFixtures::hr_manager(), period)
            .await
            .unwrap();
        assert_eq!(report.total_claims, 1);
        assert_money_eq(&report.total_amount, dec!(360));

        let analytics = hr
            .analytics_at(&ActorFixtures::hr_manager(), approved.date)
            .await
            .unwrap();
        let maths = analytics
            .department_summaries
            .iter()
            .find(|d| d.department == "Mathematics")
            .unwrap();
        assert_eq!(maths.total_claims, 1);
    }

    #[tokio::test]
    async fn test_coordinator_escalates_large_claim() {
        let claim = ClaimFixtures::over_coordinator_limit();
        let id = claim.id;
        let store: Arc<dyn ClaimPort> = Arc::new(InMemoryClaimStore::with_claims(vec![claim]));
        let reviews = review_service(store);

        let err = reviews
            .approve(id, &ActorFixtures::coordinator())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::ApprovalDenied(_)));

        let approved = reviews
            .approve(id, &ActorFixtures::academic_manager())
            .await
            .unwrap();
        assert_approved_by(&approved, "a.manager");
    }

    #[tokio::test]
    async fn test_blocked_claim_can_still_be_rejected() {
        let claim = ClaimFixtures::excessive_hours();
        let id = claim.id;
        let store: Arc<dyn ClaimPort> = Arc::new(InMemoryClaimStore::with_claims(vec![claim]));
        let reviews = review_service(store);

        let assessment = reviews
            .assess(id, &ActorFixtures::academic_manager())
            .await
            .unwrap();
        assert_has_errors(&assessment.findings);
        assert_finding(
            &assessment.findings,
            Severity::Error,
            "Hours worked (45) exceeds maximum allowed (40)",
        );

        assert!(matches!(
            reviews.approve(id, &ActorFixtures::academic_manager()).await,
            Err(ReviewError::ValidationBlocked(_))
        ));

        let rejected = reviews
            .reject(id, &ActorFixtures::academic_manager(), Some("Split it".to_string()))
            .await
            .unwrap();
        assert_rejected(&rejected);
    }

    #[tokio::test]
    async fn test_lecturer_listing_is_newest_first() {
        let claims = (1..=5)
            .map(|day| {
                TestClaimBuilder::new()
                    .with_lecturer("john.doe")
                    .with_date(TemporalFixtures::march_day(day * 3))
                    .build()
            })
            .collect();
        let reviews = review_service(Arc::new(InMemoryClaimStore::with_claims(claims)));

        let mine = reviews
            .my_claims(&ActorFixtures::lecturer("john.doe"))
            .await
            .unwrap();
        assert_eq!(mine.len(), 5);
        assert_newest_first(&mine);
    }
}

// ============================================================================
// PostgreSQL Adapters
// ============================================================================

mod postgres_adapters {
    use super::*;

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_claim_lifecycle_in_postgres() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = PostgresClaimAdapter::new(db.pool().clone());
        assert!(adapter.health_check().await.is_healthy());

        let claim = TestClaimBuilder::new()
            .with_hours(dec!(7.5))
            .with_notes("Lab supervision")
            .build();
        adapter.submit_claim(&claim).await.unwrap();

        let duplicate = adapter.submit_claim(&claim).await.unwrap_err();
        assert!(matches!(duplicate, PortError::Conflict { .. }));

        let loaded = adapter.get_claim(claim.id).await.unwrap().unwrap();
        assert_eq!(loaded.hours, dec!(7.5));
        assert_eq!(adapter.pending_claims().await.unwrap().len(), 1);

        let approved = adapter.approve_claim(claim.id, "Academic Manager").await.unwrap();
        assert_approved_by(&approved, "Academic Manager");

        let again = adapter.reject_claim(claim.id, None).await.unwrap_err();
        assert!(matches!(again, PortError::Conflict { .. }));

        assert_eq!(adapter.approved_claims().await.unwrap().len(), 1);
        assert!(adapter.pending_claims().await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_roster_and_reports_in_postgres() {
        let db = create_isolated_test_database().await.unwrap();
        let adapter = PostgresHrAdapter::new(db.pool().clone());

        let new = TestLecturerBuilder::new().with_employee_id("EMP500").build_new();
        let created = adapter.create_lecturer(new.clone()).await.unwrap();

        let duplicate = adapter.create_lecturer(new).await.unwrap_err();
        assert!(matches!(duplicate, PortError::Conflict { .. }));

        adapter.deactivate_lecturer(created.id).await.unwrap();
        let stored = adapter
            .get_lecturer_by_employee_id("EMP500")
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_active);

        let claim = TestClaimBuilder::new()
            .with_date(TemporalFixtures::march_day(10))
            .approved_by("pc")
            .build();
        let report = domain_hr::PaymentReport::build(
            TemporalFixtures::march(),
            &[claim],
            "hr.manager",
            &TemporalFixtures::utc(),
            Currency::USD,
        );
        adapter.save_report(&report).await.unwrap();

        let loaded = adapter.get_report(report.id).await.unwrap().unwrap();
        assert_eq!(loaded.lines, report.lines);
        assert_money_eq(&loaded.total_amount, dec!(500));
        assert_eq!(adapter.list_reports().await.unwrap().len(), 1);

        db.clear_data().await.unwrap();
        assert!(adapter.list_lecturers().await.unwrap().is_empty());
    }
}
