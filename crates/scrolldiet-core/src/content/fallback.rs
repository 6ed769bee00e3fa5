//! Built-in posts used when the content service is unavailable.

use rand::seq::SliceRandom;
use rand::Rng;

use super::post::{image_url, Post};

struct Seed {
    username: &'static str,
    caption: &'static str,
    likes: u64,
    comments: u64,
    keyword: &'static str,
    music_track: &'static str,
}

const SEEDS: [Seed; 5] = [
    Seed {
        username: "travel_enthusiast",
        caption: "Wait for the view at the end! 🏔️ #travel #mountains",
        likes: 12_400,
        comments: 342,
        keyword: "mountains",
        music_track: "Chill Vibes - LoFi",
    },
    Seed {
        username: "foodie_heaven",
        caption: "This pasta recipe will change your life 🍝 #foodie #cooking",
        likes: 8_500,
        comments: 120,
        keyword: "pasta",
        music_track: "Cooking ASMR - Chef",
    },
    Seed {
        username: "tech_insider",
        caption: "Did you know this iPhone trick? 📱 #tech #hacks",
        likes: 45_000,
        comments: 980,
        keyword: "tech",
        music_track: "Tech News Intro",
    },
    Seed {
        username: "cute_puppies",
        caption: "He fell asleep like this 🥺 #dogs #puppy",
        likes: 92_000,
        comments: 2_100,
        keyword: "puppy",
        music_track: "Funny Song - TikTok",
    },
    Seed {
        username: "fitness_jim",
        caption: "Stop doing pushups like this! ❌ Fix your form. #gym #fitness",
        likes: 15_000,
        comments: 400,
        keyword: "gym",
        music_track: "Workout Hype - Gym",
    },
];

/// Number of distinct built-in posts.
pub const FALLBACK_LEN: usize = SEEDS.len();

/// `count` shuffled built-in posts.
///
/// Every call mints fresh ids so a second batch counts as new views. When
/// `count` exceeds the built-in set the shuffled order repeats.
pub fn fallback_posts(count: usize) -> Vec<Post> {
    fallback_posts_with(count, &mut rand::thread_rng())
}

pub fn fallback_posts_with<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Post> {
    let mut order: Vec<&Seed> = SEEDS.iter().collect();
    order.shuffle(rng);
    let batch = uuid::Uuid::new_v4().simple().to_string();

    order
        .into_iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, seed)| Post {
            id: format!("fallback-{batch}-{i}"),
            username: seed.username.to_string(),
            caption: seed.caption.to_string(),
            likes: seed.likes,
            comments: seed.comments,
            image_url: image_url(seed.keyword),
            music_track: Some(seed.music_track.to_string()),
        })
        .collect()
}
