use hull::{
    Database, Entity, Executor, ExpressionExt, Order, QueryError, Related, Status, col, col_of,
};
use indoc::indoc;
use std::sync::Mutex;
use time::{Date, macros::date};

#[derive(Entity, Debug)]
struct Post {
    id: i64,
    title: String,
    score: i32,
    published: Option<Date>,
    status: Status,
    comments: Related<Comment>,
}

#[derive(Entity, Debug)]
struct Comment {
    id: i64,
    #[hull(references = Post)]
    post_id: i64,
    body: String,
    status: Status,
}

fn bodies(post: &Post) -> Vec<&str> {
    let mut result: Vec<_> = post.comments.iter().map(|c| c.body.as_str()).collect();
    result.sort();
    result
}

pub fn blog<Exec: Executor>(db: &mut Database<Exec>) {
    static MUTEX: Mutex<()> = Mutex::new(());
    let _lock = MUTEX.lock().unwrap();

    // Setup
    db.register::<Post>().expect("Failed to register Post");
    db.register::<Comment>().expect("Failed to register Comment");
    let affected = db
        .executor()
        .execute(indoc! {r#"
            DROP TABLE IF EXISTS "comment";
            DROP TABLE IF EXISTS "post";
            CREATE TABLE "post" (
                "id" INTEGER PRIMARY KEY,
                "title" TEXT NOT NULL,
                "score" INTEGER NOT NULL,
                "published" TEXT
            );
            CREATE TABLE "comment" (
                "id" INTEGER PRIMARY KEY,
                "post_id" INTEGER NOT NULL,
                "body" TEXT NOT NULL
            );
            INSERT INTO "post" ("id", "title", "score", "published") VALUES
                (1, 'Hello', 10, '2025-03-01'),
                (2, 'Second', 5, NULL),
                (3, 'Empty', 7, '2025-04-15');
            INSERT INTO "comment" ("id", "post_id", "body") VALUES
                (10, 1, 'First!'),
                (11, 1, 'Great post'),
                (12, 2, 'Meh');
        "#})
        .expect("Failed to create the blog tables");
    assert_eq!(affected.rows_affected, 6);

    // Joined, every parent with all of its children
    let posts = db
        .query::<Post>()
        .join("Comment")
        .order_by("score", Order::DESC)
        .to_list(None)
        .expect("Failed to list the posts with comments");
    assert_eq!(
        posts.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        ["Hello", "Empty", "Second"]
    );
    assert_eq!(bodies(&posts[0]), ["First!", "Great post"]);
    assert!(posts[1].comments.is_empty());
    assert_eq!(bodies(&posts[2]), ["Meh"]);
    assert!(posts.iter().all(|p| p.status == Status::Fetched));
    assert!(
        posts
            .iter()
            .flat_map(|p| p.comments.iter().map(move |c| (p.id, c)))
            .all(|(id, c)| c.post_id == id && c.status == Status::Fetched)
    );
    assert_eq!(posts[0].published, Some(date!(2025 - 03 - 01)));
    assert_eq!(posts[2].published, None);

    // The cap counts parents, the last one keeps its children
    let posts = db
        .query::<Post>()
        .join_entity::<Comment>()
        .order_by("score", Order::DESC)
        .to_list(Some(1))
        .expect("Failed to list the first post");
    assert_eq!(posts.len(), 1);
    assert_eq!(bodies(&posts[0]), ["First!", "Great post"]);
    let posts = db
        .query::<Post>()
        .join("Comment")
        .to_list(Some(0))
        .expect("Failed to list the posts with a zero cap");
    assert_eq!(posts.len(), 3);
    assert_eq!(posts.iter().map(|p| p.comments.len()).sum::<usize>(), 3);

    // Without a join the relations stay empty
    let posts = db
        .query::<Post>()
        .order_by("title", Order::ASC)
        .to_list(None)
        .expect("Failed to list the posts");
    assert_eq!(
        posts.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        ["Empty", "Hello", "Second"]
    );
    assert!(posts.iter().all(|p| p.comments.is_empty()));

    // Filters
    let count = db
        .query::<Post>()
        .filter(col("score").greater(6))
        .count()
        .expect("Failed to count the posts");
    assert_eq!(count, 2);
    let post = db
        .query::<Post>()
        .filter(col("published").greater(date!(2025 - 03 - 15)))
        .first()
        .expect("Failed to query the recent posts")
        .expect("Expected a post published after March 15");
    assert_eq!(post.title, "Empty");
    let post = db
        .query::<Post>()
        .filter(col("published").is_null())
        .first()
        .expect("Failed to query the unpublished posts")
        .expect("Expected an unpublished post");
    assert_eq!(post.id, 2);
    let posts = db
        .query::<Post>()
        .join("Comment")
        .filter(col_of("comment", "body").like("%!"))
        .to_list(None)
        .expect("Failed to filter on the comments");
    assert_eq!(posts.len(), 1);
    assert_eq!(bodies(&posts[0]), ["First!"]);
    let count = db
        .query::<Post>()
        .join("Comment")
        .count()
        .expect("Failed to count the joined posts");
    assert_eq!(count, 3, "Joined count must count each post once");

    // Aggregates
    let max: i32 = db.query::<Post>().max("score").expect("Failed max");
    let min: i32 = db.query::<Post>().min("score").expect("Failed min");
    let average: f64 = db.query::<Post>().average("score").expect("Failed average");
    assert_eq!(max, 10);
    assert_eq!(min, 5);
    assert!((average - 22.0 / 3.0).abs() < 1e-9);

    // Nothing matches
    let nothing = || col("score").greater(100);
    assert!(
        db.query::<Post>()
            .filter(nothing())
            .first()
            .expect("Failed first on no match")
            .is_none()
    );
    assert_eq!(db.query::<Post>().filter(nothing()).count().unwrap(), 0);
    assert_eq!(
        db.query::<Post>()
            .filter(nothing())
            .max::<i32>("score")
            .unwrap(),
        0
    );

    // Rejected before reaching the backend
    let error = db
        .query::<Post>()
        .order_by("rating", Order::ASC)
        .to_list(None)
        .expect_err("Ordering by an unknown field must fail");
    assert!(matches!(
        error.downcast_ref::<QueryError>(),
        Some(QueryError::UnknownColumn { column, .. }) if column == "rating"
    ));
    let error = db
        .query::<Post>()
        .join("Tag")
        .to_list(None)
        .expect_err("Joining an unregistered type must fail");
    assert!(matches!(
        error.downcast_ref::<QueryError>(),
        Some(QueryError::UnknownType { .. })
    ));

    // Remove
    let removed = db
        .query::<Post>()
        .filter(col("score").less(6))
        .remove()
        .expect("Failed to remove the low score posts");
    assert_eq!(removed, 1);
    assert_eq!(db.query::<Post>().count().unwrap(), 2);
}
