use serde_json::json;

use crate::common::{TestApp, routes};

mod faculty_crud {
    use super::*;

    #[tokio::test]
    async fn create_and_fetch_faculty() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::FACULTIES,
                &json!({ "name": "Gryffindor", "color": "red" }),
            )
            .await;
        assert_eq!(res.status, 201, "create failed: {}", res.text);
        assert_eq!(res.body["name"].as_str().unwrap(), "Gryffindor");
        assert_eq!(res.body["color"].as_str().unwrap(), "red");

        let id = res.id();
        let fetched = app.get(&routes::faculty(id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["name"].as_str().unwrap(), "Gryffindor");
    }

    #[tokio::test]
    async fn get_missing_faculty_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::faculty(404)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn update_replaces_name_and_color() {
        let app = TestApp::spawn().await;
        let id = app.create_faculty("Temporary", "grey").await;

        let res = app
            .put(
                &routes::faculty(id),
                &json!({ "name": "Ravenclaw", "color": "blue" }),
            )
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"].as_str().unwrap(), "Ravenclaw");
        assert_eq!(res.body["color"].as_str().unwrap(), "blue");
    }

    #[tokio::test]
    async fn delete_keeps_students_but_detaches_them() {
        let app = TestApp::spawn().await;
        let faculty_id = app.create_faculty("Doomed", "black").await;
        let student_id = app.create_student("Survivor", 16, Some(faculty_id)).await;

        let res = app.delete(&routes::faculty(faculty_id)).await;
        assert_eq!(res.status, 204);

        let student = app.get(&routes::student(student_id)).await;
        assert_eq!(student.status, 200);
        assert!(student.body["faculty_id"].is_null());

        let membership = app.get(&routes::student_faculty(student_id)).await;
        assert_eq!(membership.status, 404);
    }

    #[tokio::test]
    async fn delete_missing_faculty_is_404() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::faculty(31337)).await;
        assert_eq!(res.status, 404);
    }
}

mod faculty_queries {
    use super::*;

    #[tokio::test]
    async fn filter_by_color_only() {
        let app = TestApp::spawn().await;
        app.create_faculty("Gryffindor", "red").await;
        app.create_faculty("Slytherin", "green").await;
        app.create_faculty("Durmstrang", "red").await;

        let res = app.get(&routes::faculty_filter("color=red")).await;
        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Gryffindor", "Durmstrang"]);
    }

    #[tokio::test]
    async fn filter_requires_both_when_both_given() {
        let app = TestApp::spawn().await;
        app.create_faculty("Gryffindor", "red").await;
        app.create_faculty("Durmstrang", "red").await;

        let res = app
            .get(&routes::faculty_filter("color=red&name=Gryffindor"))
            .await;
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Gryffindor"]);
    }

    #[tokio::test]
    async fn filter_without_parameters_returns_everything() {
        let app = TestApp::spawn().await;
        app.create_faculty("One", "red").await;
        app.create_faculty("Two", "blue").await;

        let res = app.get(&routes::faculty_filter("")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn filter_match_is_exact() {
        let app = TestApp::spawn().await;
        app.create_faculty("Gryffindor", "red").await;

        let res = app.get(&routes::faculty_filter("name=gryffindor")).await;
        assert_eq!(res.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn students_of_faculty_lists_members_only() {
        let app = TestApp::spawn().await;
        let gryffindor = app.create_faculty("Gryffindor", "red").await;
        let slytherin = app.create_faculty("Slytherin", "green").await;
        app.create_student("Harry", 17, Some(gryffindor)).await;
        app.create_student("Draco", 17, Some(slytherin)).await;
        app.create_student("Neville", 17, Some(gryffindor)).await;

        let res = app.get(&routes::faculty_students(gryffindor)).await;
        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Harry", "Neville"]);
    }

    #[tokio::test]
    async fn students_of_unknown_faculty_is_an_empty_list() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::faculty_students(888)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn longest_name_of_empty_store_is_empty() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::LONGEST_NAME).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"].as_str().unwrap(), "");
    }

    #[tokio::test]
    async fn longest_name_ties_resolve_to_first_created() {
        let app = TestApp::spawn().await;
        // Gryffindor and Hufflepuff are both 10 characters long.
        app.create_faculty("Gryffindor", "red").await;
        app.create_faculty("Slytherin", "green").await;
        app.create_faculty("Hufflepuff", "yellow").await;
        app.create_faculty("Ravenclaw", "blue").await;

        let res = app.get(routes::LONGEST_NAME).await;
        assert_eq!(res.body["name"].as_str().unwrap(), "Gryffindor");
    }

    #[tokio::test]
    async fn longest_name_picks_the_strictly_longest() {
        let app = TestApp::spawn().await;
        app.create_faculty("Slytherin", "green").await;
        app.create_faculty("Hufflepuff", "yellow").await;
        app.create_faculty("Ravenclaw", "blue").await;

        let res = app.get(routes::LONGEST_NAME).await;
        assert_eq!(res.body["name"].as_str().unwrap(), "Hufflepuff");
    }
}
