use jobboard_core::{format_salary, limit_text, Job, JobId, SALARY_NOT_SPECIFIED};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn validity_follows_truthiness_of_id_and_title() {
    assert!(Job::from_value(&json!({"id": 0, "title": "A"})).is_none());
    assert!(Job::from_value(&json!({"id": "", "title": "A"})).is_none());
    assert!(Job::from_value(&json!({"id": 1, "title": ""})).is_none());
    assert!(Job::from_value(&json!({"id": 1, "title": null})).is_none());
    assert!(Job::from_value(&json!({"id": 1, "title": 0})).is_none());
    assert!(Job::from_value(&json!({"id": 1, "title": false})).is_none());
    assert!(Job::from_value(&json!({"id": 1})).is_none());
    assert!(Job::from_value(&json!({"id": true, "title": "A"})).is_none());
    assert!(Job::from_value(&json!(null)).is_none());
    assert!(Job::from_value(&json!([1, "A"])).is_none());

    let job = Job::from_value(&json!({"id": "abc", "title": "A", "views": 3})).unwrap();
    assert_eq!(job.id, JobId::from("abc"));
    assert_eq!(job.attr("views"), Some(&json!(3)));

    let numeric = Job::from_value(&json!({"id": 7, "title": 42})).unwrap();
    assert_eq!(numeric.title, json!(42));
    assert_eq!(numeric.title_text(), "42");
    assert_eq!(numeric.to_value(), json!({"id": 7, "title": 42}));
}

#[test]
fn record_survives_storage_blob_unchanged() {
    let raw = json!({
        "id": 42,
        "title": "Driver",
        "primary_details": {"Salary": "12000"},
        "phone_number_details": {"phone_number": "99999"}
    });
    let job = Job::from_value(&raw).unwrap();

    let blob = serde_json::to_string(&vec![job.clone()]).unwrap();
    let back: Vec<Job> = serde_json::from_str(&blob).unwrap();

    assert_eq!(back, vec![job.clone()]);
    assert_eq!(job.to_value(), raw);
    assert_eq!(serde_json::to_value(&job).unwrap(), raw);
}

#[test]
fn accessors_follow_fallback_chains() {
    let job = Job::from_value(&json!({
        "id": 1,
        "title": "Cook",
        "location_string": "Delhi",
        "primary_details": {"Salary": "", "Experience": "2 years", "job_type": "Full time"},
        "job_details": {"Salary": "15000", "Qualification": "10th pass", "english_knowledge": "Basic"},
        "job_description": "Make food",
        "phone_number_details": {"phone_number": "12345"}
    }))
    .unwrap();

    assert_eq!(job.location().as_deref(), Some("Delhi"));
    assert_eq!(job.salary(), Some(&json!("15000")));
    assert_eq!(job.experience().as_deref(), Some("2 years"));
    assert_eq!(job.job_type().as_deref(), Some("Full time"));
    assert_eq!(job.qualification().as_deref(), Some("10th pass"));
    assert_eq!(job.english_level().as_deref(), Some("Basic"));
    assert_eq!(job.description().as_deref(), Some("Make food"));
    assert_eq!(job.phone_number().as_deref(), Some("12345"));
}

#[test]
fn primary_details_win_over_fallbacks() {
    let job = Job::from_value(&json!({
        "id": 1,
        "title": "Cook",
        "location_string": "Delhi",
        "salary_range": "1-2k",
        "primary_details": {"location_string": "Mumbai", "Job_Description": "Primary"},
        "job_description": "Secondary"
    }))
    .unwrap();

    assert_eq!(job.location().as_deref(), Some("Mumbai"));
    assert_eq!(job.salary(), Some(&json!("1-2k")));
    assert_eq!(job.description().as_deref(), Some("Primary"));
    assert_eq!(job.phone_number(), None);
    assert_eq!(job.experience(), None);
}

#[test]
fn share_message_mentions_location_when_known() {
    let with_location = Job::new(1u64, "Cook").with_attr("location_string", json!("Delhi"));
    assert_eq!(
        with_location.share_message(),
        "Check out this job: Cook at Delhi."
    );
    assert_eq!(
        Job::new(2u64, "Cook").share_message(),
        "Check out this job: Cook."
    );
}

#[test]
fn salary_formatting() {
    assert_eq!(format_salary(None), SALARY_NOT_SPECIFIED);
    assert_eq!(format_salary(Some(&json!(""))), SALARY_NOT_SPECIFIED);
    assert_eq!(format_salary(Some(&json!(0))), SALARY_NOT_SPECIFIED);
    assert_eq!(format_salary(Some(&json!("₹10,000 - ₹15,000"))), "₹10,000 - ₹15,000");
    assert_eq!(format_salary(Some(&json!(950))), "$950");
    assert_eq!(format_salary(Some(&json!(12345))), "$12,345");
    assert_eq!(format_salary(Some(&json!(1234567.6))), "$1,234,568");
}

#[test]
fn text_limiting() {
    assert_eq!(limit_text("short", 10), "short");
    assert_eq!(limit_text("exactly", 7), "exactly");
    assert_eq!(limit_text("a longer sentence", 8), "a longer...");
    assert_eq!(limit_text("नमस्ते दुनिया", 3), "नमस...");
}
