//! Integration specifications for the divestment planning workflow.
//!
//! Scenarios drive the bundled rules catalog through the public coordinator
//! facade so envelopes, eligibility verdicts, and record keeping are
//! validated without reaching into private modules.

mod common {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use medicaid_planner::planning::{
        AssessmentRecord, ClientId, ClientRecord, FamilyMember, HouseholdContext, MaritalStatus,
        PlanRecord, RecordStore, RecordStoreError, TransferDetails,
    };
    use medicaid_planner::{
        CachedRulesProvider, ClientInfo, PlanningCoordinator, PlanningRequest, StaticRulesCatalog,
        TransferRecord,
    };

    pub(super) fn assessment_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid assessment date")
    }

    pub(super) fn mary_hill() -> ClientInfo {
        ClientInfo {
            name: "Mary Hill".to_string(),
            age: Some(79),
            marital_status: MaritalStatus::Single,
            household: HouseholdContext {
                family_members: vec![FamilyMember {
                    name: "Alice Hill".to_string(),
                    relationship: "daughter".to_string(),
                    provides_care: true,
                }],
                medical: None,
            },
        }
    }

    fn transfer_history() -> Vec<TransferRecord> {
        vec![
            TransferRecord {
                date: "2024-01-15".to_string(),
                amount: 24_000.0,
                recipient: "son".to_string(),
                purpose: "gift".to_string(),
                documentation: Some("check #1041".to_string()),
                details: None,
            },
            TransferRecord {
                date: "2024-06-10".to_string(),
                amount: 15_000.0,
                recipient: "Alice Hill".to_string(),
                purpose: "caregiver compensation".to_string(),
                documentation: Some("care agreement".to_string()),
                details: Some(TransferDetails {
                    years_of_care: Some(3.0),
                    hours_per_week: Some(35.0),
                    relationship: Some("daughter".to_string()),
                }),
            },
            TransferRecord {
                date: "2019-05-01".to_string(),
                amount: 50_000.0,
                recipient: "son".to_string(),
                purpose: "gift".to_string(),
                documentation: Some("wire receipt".to_string()),
                details: None,
            },
        ]
    }

    pub(super) fn minnesota_request() -> PlanningRequest {
        PlanningRequest {
            client: mary_hill(),
            assets: BTreeMap::from([
                ("checking".to_string(), 1_800.0),
                ("primary_residence".to_string(), 200_000.0),
            ]),
            income: BTreeMap::from([("social security".to_string(), 1_500.0)]),
            transfers: transfer_history(),
            jurisdiction: "Minnesota".to_string(),
        }
    }

    pub(super) fn coordinator() -> PlanningCoordinator<CachedRulesProvider<StaticRulesCatalog>> {
        PlanningCoordinator::new(CachedRulesProvider::new(StaticRulesCatalog::builtin_2025()))
    }

    #[derive(Default)]
    pub(super) struct MemoryRecordStore {
        clients: Mutex<HashMap<String, ClientRecord>>,
        assessments: Mutex<Vec<AssessmentRecord>>,
        plans: Mutex<Vec<PlanRecord>>,
    }

    impl RecordStore for MemoryRecordStore {
        fn create_client(&self, record: ClientRecord) -> Result<(), RecordStoreError> {
            let mut clients = self.clients.lock().expect("clients mutex poisoned");
            if clients.contains_key(&record.id.0) {
                return Err(RecordStoreError::Conflict(record.id.to_string()));
            }
            clients.insert(record.id.0.clone(), record);
            Ok(())
        }

        fn find_client(&self, id: &ClientId) -> Result<Option<ClientRecord>, RecordStoreError> {
            let clients = self.clients.lock().expect("clients mutex poisoned");
            Ok(clients.get(&id.0).cloned())
        }

        fn create_assessment(&self, record: AssessmentRecord) -> Result<(), RecordStoreError> {
            let mut assessments = self.assessments.lock().expect("assessments mutex poisoned");
            assessments.push(record);
            Ok(())
        }

        fn find_assessments(
            &self,
            client: &ClientId,
        ) -> Result<Vec<AssessmentRecord>, RecordStoreError> {
            let assessments = self.assessments.lock().expect("assessments mutex poisoned");
            Ok(assessments
                .iter()
                .filter(|record| record.client_id == *client)
                .cloned()
                .collect())
        }

        fn create_plan(&self, record: PlanRecord) -> Result<(), RecordStoreError> {
            let mut plans = self.plans.lock().expect("plans mutex poisoned");
            plans.push(record);
            Ok(())
        }

        fn find_plans(&self, client: &ClientId) -> Result<Vec<PlanRecord>, RecordStoreError> {
            let plans = self.plans.lock().expect("plans mutex poisoned");
            Ok(plans
                .iter()
                .filter(|record| record.client_id == *client)
                .cloned()
                .collect())
        }
    }
}

mod planning {
    use super::common::*;
    use chrono::NaiveDate;
    use medicaid_planner::PlanningResult;

    #[test]
    fn bundled_rules_drive_a_full_divestment_review() {
        let result = coordinator().plan_divestment(&minnesota_request(), assessment_date());

        let plan = match result {
            PlanningResult::Success(plan) => plan,
            PlanningResult::Error { error } => panic!("expected success, got error: {error}"),
        };

        // 24,000 gifted minus the 19,000 annual exclusion leaves 5,000 penalized.
        assert!((plan.transfer_analysis.non_exempt_total - 5_000.0).abs() < 1e-9);
        assert_eq!(plan.transfer_analysis.exempt_transfers.len(), 1);
        assert_eq!(plan.transfer_analysis.transfers_out_of_window.len(), 1);

        assert!(plan.penalty_calculation.has_penalty);
        assert_eq!(plan.penalty_calculation.penalty_days, 15);
        assert_eq!(
            plan.penalty_calculation.penalty_end_date,
            NaiveDate::from_ymd_opt(2025, 7, 16).expect("valid date")
        );

        assert!(plan.eligibility.is_eligible());

        let ids: Vec<&str> = plan.strategies.iter().map(|s| s.id).collect();
        assert!(ids.contains(&"bridge-penalty-period"));
        assert!(ids.contains(&"formalize-family-caregiver-agreement"));
        assert!(plan.summary.contains("Mary Hill"));
    }

    #[test]
    fn envelopes_serialize_with_status_tags() {
        let success = coordinator().plan_divestment(&minnesota_request(), assessment_date());
        let encoded = serde_json::to_value(&success).expect("success envelope serializes");
        assert_eq!(encoded["status"], "success");
        assert!(encoded["strategies"].is_array());

        let mut lost_request = minnesota_request();
        lost_request.jurisdiction = "Narnia".to_string();
        let failure = coordinator().plan_divestment(&lost_request, assessment_date());
        let encoded = serde_json::to_value(&failure).expect("error envelope serializes");
        assert_eq!(encoded["status"], "error");
        assert!(encoded["error"]
            .as_str()
            .expect("error string present")
            .contains("Narnia"));
    }

    #[test]
    fn one_coordinator_serves_repeated_requests() {
        let coordinator = coordinator();

        let first = coordinator.plan_divestment(&minnesota_request(), assessment_date());
        let second = coordinator.plan_divestment(&minnesota_request(), assessment_date());

        assert!(first.is_success());
        assert_eq!(
            serde_json::to_value(&first).expect("serializes"),
            serde_json::to_value(&second).expect("serializes")
        );
    }
}

mod eligibility {
    use std::collections::BTreeMap;

    use super::common::*;
    use medicaid_planner::planning::MaritalStatus;
    use medicaid_planner::EligibilityRequest;

    #[test]
    fn married_limits_apply_in_other_states() {
        let mut client = mary_hill();
        client.marital_status = MaritalStatus::Married;
        let request = EligibilityRequest {
            client,
            assets: BTreeMap::from([("brokerage".to_string(), 100_000.0)]),
            income: BTreeMap::from([("pension".to_string(), 3_000.0)]),
            jurisdiction: "NY".to_string(),
        };

        let verdict = coordinator()
            .assess_eligibility(&request, assessment_date())
            .expect("eligibility assessment succeeds");

        assert!(verdict.is_resource_eligible);
        assert!(verdict.is_income_eligible);
    }
}

mod records {
    use std::collections::BTreeMap;

    use super::common::*;
    use medicaid_planner::planning::{
        AssessmentId, AssessmentRecord, ClientId, ClientRecord, PlanId, PlanRecord, RecordStore,
        RecordStoreError,
    };
    use medicaid_planner::{EligibilityRequest, PlanningResult};

    #[test]
    fn records_round_trip_through_the_store() {
        let store = MemoryRecordStore::default();
        let coordinator = coordinator();
        let client_id = ClientId("client-0001".to_string());

        store
            .create_client(ClientRecord {
                id: client_id.clone(),
                client: mary_hill(),
                created_on: assessment_date(),
            })
            .expect("client record stored");

        let duplicate = store.create_client(ClientRecord {
            id: client_id.clone(),
            client: mary_hill(),
            created_on: assessment_date(),
        });
        assert!(matches!(duplicate, Err(RecordStoreError::Conflict(_))));

        let plan = match coordinator.plan_divestment(&minnesota_request(), assessment_date()) {
            PlanningResult::Success(plan) => plan,
            PlanningResult::Error { error } => panic!("expected success, got error: {error}"),
        };
        let verdict = coordinator
            .assess_eligibility(
                &EligibilityRequest {
                    client: mary_hill(),
                    assets: BTreeMap::from([("checking".to_string(), 1_800.0)]),
                    income: BTreeMap::from([("social security".to_string(), 1_500.0)]),
                    jurisdiction: "Minnesota".to_string(),
                },
                assessment_date(),
            )
            .expect("eligibility assessment succeeds");

        store
            .create_plan(PlanRecord {
                id: PlanId("plan-0001".to_string()),
                client_id: client_id.clone(),
                plan,
                planned_on: assessment_date(),
            })
            .expect("plan record stored");
        store
            .create_assessment(AssessmentRecord {
                id: AssessmentId("assessment-0001".to_string()),
                client_id: client_id.clone(),
                jurisdiction: "Minnesota".to_string(),
                verdict,
                assessed_on: assessment_date(),
            })
            .expect("assessment record stored");

        let found = store
            .find_client(&client_id)
            .expect("client lookup succeeds")
            .expect("client record present");
        assert_eq!(found.client.name, "Mary Hill");
        assert_eq!(store.find_plans(&client_id).expect("plan lookup").len(), 1);
        assert_eq!(
            store
                .find_assessments(&client_id)
                .expect("assessment lookup")
                .len(),
            1
        );
        assert!(store
            .find_client(&ClientId("client-9999".to_string()))
            .expect("missing lookup succeeds")
            .is_none());
    }
}
