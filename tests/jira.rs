#[cfg(test)]
mod tests {
    use base64::prelude::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;
    use timesheet::api::jira::{issue_summary, search_jql, search_summaries, Jira, JiraConfig, JiraIssue, JiraIssueFields};
    use timesheet::libs::error::TimesheetError;

    const LOGIN: &str = "me@example.com";
    const TOKEN: &str = "jira-token";
    const ACCOUNT_ID: &str = "acc-123";

    fn config(server: &MockServer) -> JiraConfig {
        JiraConfig {
            api_url: format!("{}/", server.base_url()),
            project_key: "TS".to_string(),
            login: LOGIN.to_string(),
            token: TOKEN.to_string(),
        }
    }

    fn basic_auth() -> String {
        format!("Basic {}", BASE64_STANDARD.encode(format!("{}:{}", LOGIN, TOKEN)))
    }

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn issue_with_self(self_url: &str) -> JiraIssue {
        JiraIssue {
            id: "10001".to_string(),
            key: "TS-1".to_string(),
            self_url: self_url.to_string(),
            fields: JiraIssueFields::default(),
        }
    }

    /// Starts a mock Jira that accepts the test credentials and returns an
    /// authenticated client.
    async fn authenticated(server: &MockServer, email: Option<&str>) -> Jira {
        let mut user = json!({ "accountId": ACCOUNT_ID, "displayName": "Me" });
        if let Some(email) = email {
            user["emailAddress"] = json!(email);
        }
        let auth = basic_auth();
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/api/2/myself").header("Authorization", auth.as_str());
                then.status(200).json_body(user);
            })
            .await;
        Jira::authenticate(&config(server)).await.unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_fetches_identity_with_basic_auth() {
        let server = MockServer::start_async().await;
        let jira = authenticated(&server, Some(LOGIN)).await;

        assert_eq!(jira.me().account_id, ACCOUNT_ID);
        assert_eq!(jira.me().email_address.as_deref(), Some(LOGIN));
        assert_eq!(jira.project_key(), "TS");
        assert_eq!(jira.search_assignee(), LOGIN);
    }

    #[tokio::test]
    async fn test_authenticate_rejected_credentials_is_fatal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/api/2/myself");
                then.status(401).body("Client must be authenticated");
            })
            .await;

        let err = Jira::authenticate(&config(&server)).await.unwrap_err();
        assert!(matches!(err, TimesheetError::Auth(_)));
        assert!(err.to_string().contains("Client must be authenticated"));
    }

    #[tokio::test]
    async fn test_search_assignee_falls_back_to_account_id() {
        let server = MockServer::start_async().await;
        let jira = authenticated(&server, None).await;
        assert_eq!(jira.search_assignee(), ACCOUNT_ID);
    }

    #[tokio::test]
    async fn test_create_issue_sends_fields_and_reattaches_them() {
        let server = MockServer::start_async().await;
        let jira = authenticated(&server, Some(LOGIN)).await;
        let self_url = server.url("/rest/api/2/issue/10001");

        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/api/2/issue").json_body(json!({
                    "fields": {
                        "summary": "2024/03/05 Tuesday",
                        "assignee": { "accountId": ACCOUNT_ID },
                        "project": { "key": "TS" },
                        "issuetype": { "name": "Task" }
                    }
                }));
                then.status(201).json_body(json!({ "id": "10001", "key": "TS-1", "self": self_url }));
            })
            .await;

        let issue = jira.create_issue(tuesday()).await.unwrap();
        create.assert_async().await;

        assert_eq!(issue.key, "TS-1");
        assert_eq!(issue.summary(), "2024/03/05 Tuesday");
        assert_eq!(issue.fields.assignee.as_ref().map(|a| a.account_id.as_str()), Some(ACCOUNT_ID));
        assert_eq!(issue.fields.project.as_ref().map(|p| p.key.as_str()), Some("TS"));
        assert_eq!(issue.fields.issue_type.as_ref().map(|t| t.name.as_str()), Some("Task"));
        assert_eq!(issue.link_to_ui(), server.url("/browse/TS-1"));
    }

    #[tokio::test]
    async fn test_create_issue_failure_carries_response_dump() {
        let server = MockServer::start_async().await;
        let jira = authenticated(&server, Some(LOGIN)).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/api/2/issue");
                then.status(400)
                    .header("X-Request-Id", "req-42")
                    .body(r#"{"errors":{"project":"project is required"}}"#);
            })
            .await;

        match jira.create_issue(tuesday()).await {
            Err(TimesheetError::Create { dump }) => {
                assert!(dump.contains("400"));
                assert!(dump.contains("req-42"));
                assert!(dump.contains("project is required"));
            }
            other => panic!("expected create error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_issue_returns_single_match() {
        let server = MockServer::start_async().await;
        let jira = authenticated(&server, Some(LOGIN)).await;
        let self_url = server.url("/rest/api/2/issue/10001");
        let jql = search_jql(LOGIN, "TS", tuesday());

        let search = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/api/2/search")
                    .query_param("jql", jql.as_str());
                then.status(200).json_body(json!({
                    "issues": [
                        { "id": "10001", "key": "TS-1", "self": self_url, "fields": { "summary": "2024-03-05 Tuesday" } }
                    ]
                }));
            })
            .await;

        let issue = jira.find_issue(LOGIN, tuesday()).await.unwrap();
        search.assert_async().await;
        assert_eq!(issue.key, "TS-1");
        assert_eq!(issue.summary(), "2024-03-05 Tuesday");
    }

    #[tokio::test]
    async fn test_find_issue_without_match_is_not_found() {
        let server = MockServer::start_async().await;
        let jira = authenticated(&server, Some(LOGIN)).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/api/2/search");
                then.status(200).json_body(json!({ "issues": [] }));
            })
            .await;

        let err = jira.find_issue(LOGIN, tuesday()).await.unwrap_err();
        assert!(matches!(err, TimesheetError::NotFound { .. }));
        assert!(err.to_string().contains("2024/03/05 Tuesday"));
    }

    #[tokio::test]
    async fn test_find_issue_with_two_matches_lists_both_keys() {
        let server = MockServer::start_async().await;
        let jira = authenticated(&server, Some(LOGIN)).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/api/2/search");
                then.status(200).json_body(json!({
                    "issues": [
                        { "id": "10001", "key": "TS-1" },
                        { "id": "10007", "key": "TS-7" }
                    ]
                }));
            })
            .await;

        match jira.find_issue(LOGIN, tuesday()).await {
            Err(TimesheetError::Ambiguous { keys, date, .. }) => {
                assert_eq!(keys, vec!["TS-1".to_string(), "TS-7".to_string()]);
                assert_eq!(date, "2024-03-05");
            }
            other => panic!("expected ambiguous result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_issue_server_error_is_transport_error() {
        let server = MockServer::start_async().await;
        let jira = authenticated(&server, Some(LOGIN)).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/api/2/search");
                then.status(500).body("boom");
            })
            .await;

        match jira.find_issue(LOGIN, tuesday()).await {
            Err(TimesheetError::Transport { dump, .. }) => assert!(dump.contains("boom")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_issue_summary_convention() {
        assert_eq!(issue_summary(tuesday()), "2024/03/05 Tuesday");
        assert_eq!(issue_summary(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()), "2024/03/10 Sunday");
    }

    #[test]
    fn test_summary_round_trips_through_search_variants() {
        for day in 4..=8 {
            let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
            let summary = issue_summary(date);
            let variants = search_summaries(date);

            assert!(variants.contains(&summary));
            assert!(variants.contains(&summary.replace('/', "-")));

            let jql = search_jql(LOGIN, "TS", date);
            assert!(jql.contains(&variants[0]));
            assert!(jql.contains(&variants[1]));
            assert!(jql.contains(r#"project = "TS""#));
            assert!(jql.contains(r#"assignee = "me@example.com""#));
        }
    }

    #[test]
    fn test_link_to_ui_swaps_rest_path_for_browse_path() {
        let issue = issue_with_self("https://acme.atlassian.net/rest/api/2/issue/10001");
        assert_eq!(issue.link_to_ui(), "https://acme.atlassian.net/browse/TS-1");

        let issue = issue_with_self("http://jira.local:8080/rest/api/2/issue/10001");
        assert_eq!(issue.link_to_ui(), "http://jira.local:8080/browse/TS-1");
    }

    #[test]
    fn test_link_to_ui_falls_back_to_resource_url() {
        assert_eq!(issue_with_self("not a url").link_to_ui(), "not a url");
        assert_eq!(issue_with_self("").link_to_ui(), "");
    }
}
