//! Drives the real schema against an in-memory store.

mod common;

use async_graphql::{Request, Response, Variables};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use common::{BOB_ID, CAROL_ID, JO_ID, OWNER_ID, drop_table, seeded_db};
use taproom::db::Database;
use taproom::graphql::{AuthUser, build_schema};

async fn run(db: &Database, caller: Option<i64>, query: &str, variables: Value) -> Response {
    let schema = build_schema(db.clone());
    let mut request = Request::new(query).variables(Variables::from_json(variables));
    if let Some(user_id) = caller {
        request = request.data(AuthUser {
            user_id,
            email: None,
        });
    }
    schema.execute(request).await
}

fn data(response: Response) -> Value {
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.data.into_json().unwrap()
}

const ME_QUERY: &str = r#"
    query {
        me {
            id
            email
            status
            notifications { id title read }
            friends { friendId friend { email } }
            reservations {
                id
                partySize
                table { label }
                pub { name }
                location { name }
                user { email }
            }
            reviews { rating pub { name } }
            pub { name locations { name } }
            tables {
                label
                location { name }
                reservations { id user { email } }
            }
        }
    }
"#;

#[tokio::test]
async fn me_loads_every_association() {
    let db = seeded_db().await;
    let result = data(run(&db, Some(OWNER_ID), ME_QUERY, json!({})).await);

    assert_eq!(
        result,
        json!({
            "me": {
                "id": 1,
                "email": "owner@x.com",
                "status": "OWNER",
                "notifications": [
                    { "id": 100, "title": "New booking", "read": false },
                    { "id": 101, "title": "New review", "read": true }
                ],
                "friends": [
                    { "friendId": 2, "friend": { "email": "bob@x.com" } },
                    { "friendId": 3, "friend": { "email": "carol@x.com" } }
                ],
                "reservations": [
                    {
                        "id": 41,
                        "partySize": 5,
                        "table": { "label": "B" },
                        "pub": { "name": "The Crown" },
                        "location": { "name": "Garden" },
                        "user": { "email": "owner@x.com" }
                    }
                ],
                "reviews": [ { "rating": 5, "pub": { "name": "The Crown" } } ],
                "pub": {
                    "name": "The Crown",
                    "locations": [ { "name": "Bar" }, { "name": "Garden" } ]
                },
                "tables": [
                    {
                        "label": "A",
                        "location": { "name": "Bar" },
                        "reservations": [
                            { "id": 40, "user": { "email": "bob@x.com" } },
                            { "id": 42, "user": { "email": "carol@x.com" } }
                        ]
                    },
                    {
                        "label": "B",
                        "location": { "name": "Garden" },
                        "reservations": [ { "id": 41, "user": { "email": "owner@x.com" } } ]
                    }
                ]
            }
        })
    );
}

#[tokio::test]
async fn me_for_client_without_venue() {
    let db = seeded_db().await;
    let result = data(
        run(
            &db,
            Some(BOB_ID),
            "{ me { email notifications { id } reservations { id } pub { name } tables { id } } }",
            json!({}),
        )
        .await,
    );
    assert_eq!(
        result,
        json!({
            "me": {
                "email": "bob@x.com",
                "notifications": [ { "id": 102 } ],
                "reservations": [ { "id": 40 } ],
                "pub": null,
                "tables": []
            }
        })
    );
}

#[tokio::test]
async fn me_is_null_for_unknown_or_missing_caller() {
    let db = seeded_db().await;
    let unknown = data(run(&db, Some(999), "{ me { id } }", json!({})).await);
    assert_eq!(unknown, json!({ "me": null }));

    let anonymous = data(run(&db, None, "{ me { id } }", json!({})).await);
    assert_eq!(anonymous, json!({ "me": null }));
}

const EXISTS_QUERY: &str = r#"
    query Exists($email: String!) {
        exists(email: $email) {
            exists
            hasPassword
            user { id email firstName status }
        }
    }
"#;

#[tokio::test]
async fn exists_reports_missing_account() {
    let db = seeded_db().await;
    let result = data(run(&db, None, EXISTS_QUERY, json!({ "email": "a@x.com" })).await);
    assert_eq!(
        result,
        json!({
            "exists": {
                "exists": false,
                "hasPassword": false,
                "user": { "id": -1, "email": "a@x.com", "firstName": null, "status": null }
            }
        })
    );
}

#[tokio::test]
async fn exists_reports_password_state() {
    let db = seeded_db().await;

    let with_password = data(run(&db, None, EXISTS_QUERY, json!({ "email": "carol@x.com" })).await);
    assert_eq!(
        with_password,
        json!({
            "exists": {
                "exists": true,
                "hasPassword": true,
                "user": { "id": 3, "email": "carol@x.com", "firstName": "Carol", "status": "CLIENT" }
            }
        })
    );

    let without_password = data(run(&db, None, EXISTS_QUERY, json!({ "email": "bob@x.com" })).await);
    assert_eq!(without_password["exists"]["exists"], json!(true));
    assert_eq!(without_password["exists"]["hasPassword"], json!(false));
}

#[tokio::test]
async fn exists_rejects_empty_email() {
    let db = seeded_db().await;
    let response = run(&db, None, EXISTS_QUERY, json!({ "email": "" })).await;
    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(body["data"], json!({ "exists": null }));
    assert_eq!(body["errors"][0]["extensions"]["code"], json!("BAD_USER_INPUT"));
    assert_eq!(body["errors"][0]["path"], json!(["exists"]));
}

const FIND_USERS_QUERY: &str = r#"
    query Find($email: String!) {
        findUsers(email: $email) { id email status }
    }
"#;

fn ids(result: &Value, field: &str) -> Vec<i64> {
    result[field]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn find_users_filters_prefix_caller_and_status() {
    let db = seeded_db().await;
    let result = data(run(&db, Some(JO_ID), FIND_USERS_QUERY, json!({ "email": "jo" })).await);

    // 5 is the caller, 6 is an owner, 7 is an admin, 8 differs in case
    assert_eq!(ids(&result, "findUsers"), vec![4, 9]);
    for user in result["findUsers"].as_array().unwrap() {
        assert_eq!(user["status"], json!("CLIENT"));
    }
}

#[tokio::test]
async fn find_users_without_caller_excludes_nobody() {
    let db = seeded_db().await;
    let result = data(run(&db, None, FIND_USERS_QUERY, json!({ "email": "jo" })).await);
    assert_eq!(ids(&result, "findUsers"), vec![4, 5, 9]);

    let none = data(run(&db, None, FIND_USERS_QUERY, json!({ "email": "zed" })).await);
    assert_eq!(none, json!({ "findUsers": [] }));
}

#[tokio::test]
async fn find_friends_returns_callers_rows_with_friend() {
    let db = seeded_db().await;
    let query = "{ findFriends { id userId friendId friend { id email } } }";

    let result = data(run(&db, Some(OWNER_ID), query, json!({})).await);
    assert_eq!(
        result,
        json!({
            "findFriends": [
                { "id": 200, "userId": 1, "friendId": 2, "friend": { "id": 2, "email": "bob@x.com" } },
                { "id": 201, "userId": 1, "friendId": 3, "friend": { "id": 3, "email": "carol@x.com" } }
            ]
        })
    );

    let nobody = data(run(&db, Some(CAROL_ID), query, json!({})).await);
    assert_eq!(nobody, json!({ "findFriends": [] }));

    let anonymous = data(run(&db, None, query, json!({})).await);
    assert_eq!(anonymous, json!({ "findFriends": [] }));
}

#[tokio::test]
async fn store_failure_only_fails_its_field() {
    let db = seeded_db().await;
    drop_table(&db, "users").await;

    let response = run(
        &db,
        Some(CAROL_ID),
        r#"{ findUsers(email: "jo") { id } findFriends { id } }"#,
        json!({}),
    )
    .await;
    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(body["data"], json!({ "findUsers": null, "findFriends": [] }));
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["path"], json!(["findUsers"]));
    assert_eq!(errors[0]["extensions"]["code"], json!("LOOKUP_FAILED"));
    assert_eq!(errors[0]["extensions"]["operation"], json!("findUsers"));
    assert!(!errors[0]["message"].as_str().unwrap().contains("no such table"));
}

#[tokio::test]
async fn me_store_failure_is_null_with_error() {
    let db = seeded_db().await;
    drop_table(&db, "notifications").await;

    let response = run(
        &db,
        Some(OWNER_ID),
        r#"{ me { id } exists(email: "bob@x.com") { exists } }"#,
        json!({}),
    )
    .await;
    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(body["data"], json!({ "me": null, "exists": { "exists": true } }));
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["path"], json!(["me"]));
    assert_eq!(errors[0]["extensions"]["code"], json!("LOOKUP_FAILED"));
    assert_eq!(errors[0]["extensions"]["operation"], json!("me"));
}
