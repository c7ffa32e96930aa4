use std::time::Instant;

use roost::Store;

const NUM_USERS: usize = 200;
const POSTS_PER_USER: usize = 20;

#[ignore]
#[test]
fn perf_reads_over_loaded_store() {
    let store = Store::new();
    let start = Instant::now();

    println!("\n=== Performance Test ===");
    println!(
        "Creating {} users with {} posts each...",
        NUM_USERS, POSTS_PER_USER
    );

    let creation_start = Instant::now();
    let mut user_ids = Vec::with_capacity(NUM_USERS);
    for i in 0..NUM_USERS {
        let user = store
            .create_user(&format!("perf_user_{}", i), &format!("Perf User {}", i), None)
            .expect("user creation should succeed");
        for j in 0..POSTS_PER_USER {
            store
                .create_post(&user.id, &format!("post {} from {} #load #tag{}", j, i, j))
                .expect("post creation should succeed");
        }
        user_ids.push(user.id);
    }
    let creation_time = creation_start.elapsed();
    println!(
        "Created {} posts in {:.2}s ({:.0} posts/sec)",
        NUM_USERS * POSTS_PER_USER,
        creation_time.as_secs_f64(),
        (NUM_USERS * POSTS_PER_USER) as f64 / creation_time.as_secs_f64()
    );

    // One reader follows everyone; their timeline is the whole firehose.
    let reader = store
        .create_user("perf_reader", "Perf Reader", None)
        .expect("reader creation should succeed");
    for id in &user_ids {
        store.follow(&reader.id, id).expect("follow should succeed");
    }

    let read_start = Instant::now();
    let timeline = store.timeline(&reader.id).expect("timeline should succeed");
    println!(
        "Timeline over {} posts took {:.1}ms",
        timeline.len(),
        read_start.elapsed().as_secs_f64() * 1000.0
    );
    assert_eq!(timeline.len(), NUM_USERS * POSTS_PER_USER);

    let trending_start = Instant::now();
    let trending = store.trending();
    println!(
        "Trending over {} tags took {:.1}ms (top: {} x{})",
        POSTS_PER_USER + 1,
        trending_start.elapsed().as_secs_f64() * 1000.0,
        trending[0].hashtag,
        trending[0].count
    );
    assert_eq!(trending[0].hashtag, "load");

    println!("Total: {:.2}s", start.elapsed().as_secs_f64());
}
