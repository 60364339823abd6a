use serde_json::json;

use crate::common::{TestApp, routes};

mod student_crud {
    use super::*;

    #[tokio::test]
    async fn create_and_fetch_student() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({ "name": "Harry Potter", "age": 17, "faculty_id": null }),
            )
            .await;
        assert_eq!(res.status, 201, "create failed: {}", res.text);
        assert_eq!(res.body["name"].as_str().unwrap(), "Harry Potter");
        assert_eq!(res.body["age"].as_i64().unwrap(), 17);
        assert!(res.body["faculty_id"].is_null());

        let id = res.id();
        let fetched = app.get(&routes::student(id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["name"].as_str().unwrap(), "Harry Potter");
    }

    #[tokio::test]
    async fn create_trims_surrounding_whitespace() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::STUDENTS, &json!({ "name": "  Luna  ", "age": 16 }))
            .await;
        assert_eq!(res.status, 201);
        assert_eq!(res.body["name"].as_str().unwrap(), "Luna");
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::STUDENTS, &json!({ "name": "   ", "age": 15 }))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn create_rejects_negative_age() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::STUDENTS, &json!({ "name": "Nick", "age": -1 }))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn create_rejects_unknown_faculty() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::STUDENTS,
                &json!({ "name": "Cho", "age": 16, "faculty_id": 9999 }),
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn list_returns_students_in_creation_order() {
        let app = TestApp::spawn().await;
        app.create_student("First", 11, None).await;
        app.create_student("Second", 12, None).await;
        app.create_student("Third", 13, None).await;

        let res = app.get(routes::STUDENTS).await;
        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn get_missing_student_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::student(4242)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let app = TestApp::spawn().await;
        let faculty_id = app.create_faculty("Ravenclaw", "blue").await;
        let id = app.create_student("Ron", 17, None).await;

        let res = app
            .put(
                &routes::student(id),
                &json!({ "name": "Ronald", "age": 18, "faculty_id": faculty_id }),
            )
            .await;
        assert_eq!(res.status, 200, "update failed: {}", res.text);
        assert_eq!(res.body["name"].as_str().unwrap(), "Ronald");
        assert_eq!(res.body["age"].as_i64().unwrap(), 18);
        assert_eq!(res.body["faculty_id"].as_i64().unwrap(), faculty_id);
    }

    #[tokio::test]
    async fn update_with_null_faculty_detaches() {
        let app = TestApp::spawn().await;
        let faculty_id = app.create_faculty("Hufflepuff", "yellow").await;
        let id = app.create_student("Cedric", 17, Some(faculty_id)).await;

        let res = app
            .put(
                &routes::student(id),
                &json!({ "name": "Cedric", "age": 17, "faculty_id": null }),
            )
            .await;
        assert_eq!(res.status, 200);
        assert!(res.body["faculty_id"].is_null());
    }

    #[tokio::test]
    async fn update_missing_student_is_404() {
        let app = TestApp::spawn().await;

        let res = app
            .put(&routes::student(777), &json!({ "name": "Ghost", "age": 400 }))
            .await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn delete_removes_the_student() {
        let app = TestApp::spawn().await;
        let id = app.create_student("Short Lived", 15, None).await;

        let res = app.delete(&routes::student(id)).await;
        assert_eq!(res.status, 204);

        let gone = app.get(&routes::student(id)).await;
        assert_eq!(gone.status, 404);
    }

    #[tokio::test]
    async fn delete_missing_student_is_404() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::student(31337)).await;
        assert_eq!(res.status, 404);
    }
}

mod student_queries {
    use super::*;

    #[tokio::test]
    async fn by_age_matches_exactly() {
        let app = TestApp::spawn().await;
        app.create_student("Colin", 14, None).await;
        app.create_student("Ginny", 15, None).await;
        app.create_student("Dennis", 14, None).await;

        let res = app.get(&routes::students_by_age(14)).await;
        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Colin", "Dennis"]);
    }

    #[tokio::test]
    async fn by_age_rejects_non_positive() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::students_by_age(0)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn age_range_is_inclusive_on_both_ends() {
        let app = TestApp::spawn().await;
        app.create_student("Eleven", 11, None).await;
        app.create_student("Thirteen", 13, None).await;
        app.create_student("Fifteen", 15, None).await;
        app.create_student("Sixteen", 16, None).await;

        let res = app.get(&routes::students_by_age_range(13, 15)).await;
        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Thirteen", "Fifteen"]);
    }

    #[tokio::test]
    async fn age_range_rejects_inverted_bounds() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::students_by_age_range(18, 11)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn faculty_of_student_resolves_membership() {
        let app = TestApp::spawn().await;
        let faculty_id = app.create_faculty("Slytherin", "green").await;
        let id = app.create_student("Draco", 17, Some(faculty_id)).await;

        let res = app.get(&routes::student_faculty(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"].as_str().unwrap(), "Slytherin");
    }

    #[tokio::test]
    async fn faculty_of_unaffiliated_student_is_404() {
        let app = TestApp::spawn().await;
        let id = app.create_student("Loner", 16, None).await;

        let res = app.get(&routes::student_faculty(id)).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn count_tracks_inserts_and_deletes() {
        let app = TestApp::spawn().await;

        let empty = app.get(routes::STUDENT_COUNT).await;
        assert_eq!(empty.body["count"].as_u64().unwrap(), 0);

        let id = app.create_student("One", 11, None).await;
        app.create_student("Two", 12, None).await;

        let two = app.get(routes::STUDENT_COUNT).await;
        assert_eq!(two.body["count"].as_u64().unwrap(), 2);

        app.delete(&routes::student(id)).await;
        let one = app.get(routes::STUDENT_COUNT).await;
        assert_eq!(one.body["count"].as_u64().unwrap(), 1);
    }

    #[tokio::test]
    async fn average_age_of_empty_store_is_zero() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::AVERAGE_AGE).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["average_age"].as_f64().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn average_age_is_the_arithmetic_mean() {
        let app = TestApp::spawn().await;
        app.create_student("A", 10, None).await;
        app.create_student("B", 15, None).await;
        app.create_student("C", 17, None).await;

        let res = app.get(routes::AVERAGE_AGE).await;
        let avg = res.body["average_age"].as_f64().unwrap();
        assert!((avg - 14.0).abs() < 1e-9, "expected 14.0, got {avg}");
    }

    #[tokio::test]
    async fn last_five_returns_newest_first() {
        let app = TestApp::spawn().await;
        for i in 1..=7 {
            app.create_student(&format!("Student {i}"), 10 + i, None).await;
        }

        let res = app.get(routes::LAST_FIVE).await;
        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["Student 7", "Student 6", "Student 5", "Student 4", "Student 3"]
        );
    }

    #[tokio::test]
    async fn last_five_with_fewer_students_returns_them_all() {
        let app = TestApp::spawn().await;
        app.create_student("Older", 12, None).await;
        app.create_student("Newer", 13, None).await;

        let res = app.get(routes::LAST_FIVE).await;
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn names_by_letter_uppercases_and_sorts() {
        let app = TestApp::spawn().await;
        app.create_student("hermione", 17, None).await;
        app.create_student("Harry", 17, None).await;
        app.create_student("Ron", 17, None).await;

        let res = app.get(&routes::names_by_letter("h")).await;
        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s.as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["HARRY", "HERMIONE"]);
    }

    #[tokio::test]
    async fn names_by_letter_defaults_to_a() {
        let app = TestApp::spawn().await;
        app.create_student("Angelina", 17, None).await;
        app.create_student("Blaise", 17, None).await;

        let res = app.get("/api/v1/students/names-by-letter").await;
        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s.as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["ANGELINA"]);
    }

    #[tokio::test]
    async fn names_by_letter_rejects_non_letters() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::names_by_letter("7")).await;
        assert_eq!(res.status, 400);

        let res = app.get(&routes::names_by_letter("ab")).await;
        assert_eq!(res.status, 400);
    }
}
