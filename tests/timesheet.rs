#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;
    use timesheet::api::jira::{issue_summary, search_jql, JiraConfig};
    use timesheet::api::tempo::TempoConfig;
    use timesheet::libs::config::Settings;
    use timesheet::libs::dates::DateSpec;
    use timesheet::libs::error::TimesheetError;
    use timesheet::libs::timesheet::Timesheet;

    const LOGIN: &str = "me@example.com";
    const ACCOUNT_ID: &str = "acc-123";

    fn settings(jira: &MockServer, tempo: &MockServer, jira_token: &str) -> Settings {
        Settings {
            jira: JiraConfig {
                api_url: format!("{}/", jira.base_url()),
                project_key: "TS".to_string(),
                login: LOGIN.to_string(),
                token: jira_token.to_string(),
            },
            tempo: TempoConfig {
                api_url: tempo.base_url(),
                token: "tempo-token".to_string(),
            },
        }
    }

    /// The working week of Wednesday 2024-03-06.
    fn week() -> Vec<NaiveDate> {
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        DateSpec::parse_from("week", today).unwrap().dates().to_vec()
    }

    async fn connect(jira: &MockServer, tempo: &MockServer) -> Timesheet {
        jira.mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/myself");
            then.status(200).json_body(json!({
                "accountId": ACCOUNT_ID,
                "emailAddress": LOGIN,
                "displayName": "Me"
            }));
        })
        .await;
        Timesheet::connect(&settings(jira, tempo, "jira-token")).await.unwrap()
    }

    #[tokio::test]
    async fn test_log_week_creates_an_issue_and_a_worklog_per_day() {
        let jira = MockServer::start_async().await;
        let tempo = MockServer::start_async().await;
        let timesheet = connect(&jira, &tempo).await;
        let dates = week();

        let mut mocks = Vec::new();
        for (i, &date) in dates.iter().enumerate() {
            let key = format!("TS-{}", i + 1);
            let self_url = jira.url(format!("/rest/api/2/issue/{}", 10001 + i));
            let summary = issue_summary(date);
            mocks.push(
                jira.mock_async(|when, then| {
                    when.method(POST).path("/rest/api/2/issue").body_contains(summary.as_str());
                    then.status(201).json_body(json!({ "id": (10001 + i).to_string(), "key": key, "self": self_url }));
                })
                .await,
            );
            mocks.push(
                tempo
                    .mock_async(|when, then| {
                        when.method(POST)
                            .path("/worklogs")
                            .body_contains(format!(r#""issueKey":"{}""#, key))
                            .body_contains(r#""timeSpentSeconds":21600"#)
                            .body_contains(format!(r#""startDate":"{}""#, date.format("%Y-%m-%d")));
                        then.status(200).json_body(json!({ "tempoWorklogId": i + 1 }));
                    })
                    .await,
            );
        }

        let reports = timesheet.log_days(&dates, 6).await;

        for mock in &mocks {
            mock.assert_async().await;
        }
        assert_eq!(reports.len(), 5);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.date, dates[i]);
            assert_eq!(report.issue_key, format!("TS-{}", i + 1));
            assert_eq!(report.summary, issue_summary(dates[i]));
            assert_eq!(report.link, jira.url(format!("/browse/TS-{}", i + 1)));
            assert_eq!(report.hours, 6);
        }
    }

    #[tokio::test]
    async fn test_see_week_reports_logged_hours_per_day() {
        let jira = MockServer::start_async().await;
        let tempo = MockServer::start_async().await;
        let timesheet = connect(&jira, &tempo).await;
        let dates = week();

        for (i, &date) in dates.iter().enumerate() {
            let key = format!("TS-{}", i + 1);
            let self_url = jira.url(format!("/rest/api/2/issue/{}", 10001 + i));
            let jql = search_jql(LOGIN, "TS", date);
            let summary = issue_summary(date);
            jira.mock_async(|when, then| {
                when.method(GET).path("/rest/api/2/search").query_param("jql", jql.as_str());
                then.status(200).json_body(json!({
                    "issues": [{ "id": (10001 + i).to_string(), "key": key, "self": self_url, "fields": { "summary": summary } }]
                }));
            })
            .await;
            tempo
                .mock_async(|when, then| {
                    when.method(GET).path("/worklogs").query_param("issue", key.as_str());
                    then.status(200).json_body(json!({
                        "results": [
                            { "tempoWorklogId": i + 1, "issue": { "key": key }, "billableSeconds": 21600, "timeSpentSeconds": 21600 }
                        ]
                    }));
                })
                .await;
        }

        let reports = timesheet.see_days(&dates).await;

        assert_eq!(reports.len(), 5);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.issue_key, format!("TS-{}", i + 1));
            assert_eq!(report.summary, issue_summary(dates[i]));
            assert_eq!(report.hours, 6);
        }
    }

    #[tokio::test]
    async fn test_failing_date_does_not_stop_the_run() {
        let jira = MockServer::start_async().await;
        let tempo = MockServer::start_async().await;
        let timesheet = connect(&jira, &tempo).await;
        let dates = week();
        let wednesday = dates[2];

        for (i, &date) in dates.iter().enumerate() {
            let key = format!("TS-{}", i + 1);
            let summary = issue_summary(date);
            jira.mock_async(|when, then| {
                when.method(POST).path("/rest/api/2/issue").body_contains(summary.as_str());
                if date == wednesday {
                    then.status(400).body(r#"{"errors":{"summary":"rejected"}}"#);
                } else {
                    then.status(201).json_body(json!({ "id": (10001 + i).to_string(), "key": key }));
                }
            })
            .await;
        }
        let worklogs = tempo
            .mock_async(|when, then| {
                when.method(POST).path("/worklogs");
                then.status(200).json_body(json!({}));
            })
            .await;

        let reports = timesheet.log_days(&dates, 8).await;

        worklogs.assert_hits_async(4).await;
        let logged: Vec<NaiveDate> = reports.iter().map(|r| r.date).collect();
        assert_eq!(logged, vec![dates[0], dates[1], dates[3], dates[4]]);
        assert!(reports.iter().all(|r| r.hours == 8));
    }

    #[tokio::test]
    async fn test_failed_worklog_still_reports_the_rest_of_the_week() {
        let jira = MockServer::start_async().await;
        let tempo = MockServer::start_async().await;
        let timesheet = connect(&jira, &tempo).await;
        let dates = week();

        jira.mock_async(|when, then| {
            when.method(POST).path("/rest/api/2/issue");
            then.status(201).json_body(json!({ "id": "10001", "key": "TS-1" }));
        })
        .await;
        let rejected = tempo
            .mock_async(|when, then| {
                when.method(POST).path("/worklogs");
                then.status(403).body("no permission to log work");
            })
            .await;

        let reports = timesheet.log_days(&dates, 8).await;

        rejected.assert_hits_async(5).await;
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_see_missing_issue_is_skipped() {
        let jira = MockServer::start_async().await;
        let tempo = MockServer::start_async().await;
        let timesheet = connect(&jira, &tempo).await;
        let monday = week()[0];

        jira.mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/search");
            then.status(200).json_body(json!({ "issues": [] }));
        })
        .await;
        let worklogs = tempo
            .mock_async(|when, then| {
                when.method(GET).path("/worklogs");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;

        assert!(matches!(timesheet.see(monday).await, Err(TimesheetError::NotFound { .. })));
        assert!(timesheet.see_days(&[monday]).await.is_empty());
        worklogs.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_connect_with_rejected_credentials_is_fatal() {
        let jira = MockServer::start_async().await;
        let tempo = MockServer::start_async().await;
        jira.mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/myself");
            then.status(401).body("Unauthorized");
        })
        .await;

        let err = Timesheet::connect(&settings(&jira, &tempo, "wrong-token")).await.unwrap_err();
        assert!(matches!(err, TimesheetError::Auth(_)));
    }
}
