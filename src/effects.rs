//! Scenery and emotion to asset mapping.
//!
//! The vision model labels each photo with a scenery and an emotion; this
//! module turns those labels into the asset identifiers the frontend
//! overlays on the slideshow — a background track per scenery and a stamp
//! per emotion. Unknown labels (including a model that answered something
//! creative) land on the `default` rows, so every photo gets both effects.

use serde::{Deserialize, Serialize};

/// Asset URL prefixes, fixed by the frontend's static file layout.
const SOUND_PREFIX: &str = "/assets/sounds";
const STAMP_PREFIX: &str = "/assets/stamps";

/// Analysis verdict as received from the classifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub scenery: String,
    pub emotion: String,
}

/// Effect asset paths resolved for one photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effects {
    pub sound: String,
    pub stamp: String,
}

/// The record emitted by `photoprep effects` — one JSON line the backend
/// forwards to the frontend unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsRecord {
    pub filepath: String,
    pub analysis: Analysis,
    pub effects: Effects,
}

/// Resolve the effects for a photo from its analysis verdict.
pub fn decide(filepath: &str, analysis: Analysis) -> EffectsRecord {
    let sound_id = scenery_sound_id(&analysis.scenery);
    let stamp_id = emotion_stamp_id(&analysis.emotion);
    EffectsRecord {
        filepath: filepath.to_string(),
        effects: Effects {
            sound: format!("{SOUND_PREFIX}/{sound_id}.mp3"),
            stamp: format!("{STAMP_PREFIX}/{stamp_id}.png"),
        },
        analysis,
    }
}

/// Background track for a scenery label. Unknown labels get the acoustic
/// default.
pub fn scenery_sound_id(scenery: &str) -> &'static str {
    match scenery {
        // Nature
        "nature_mountain" => "bgm_hiking_acoustic",
        "nature_sea" => "bgm_ocean_wave",
        "nature_beach" => "bgm_tropical_house",
        "nature_forest" => "bgm_forest_healing",
        "nature_sunset" => "bgm_emotional_piano",
        "nature_snow" => "bgm_winter_bell",
        "nature_starry_sky" => "bgm_ambient_space",
        // Urban
        "urban_city" => "bgm_city_pop_drive",
        "urban_night_view" => "bgm_lofi_hiphop",
        "urban_street_market" => "bgm_market_bustle",
        "amusement_park" => "bgm_carnival_fun",
        "fireworks" => "bgm_summer_festival",
        // Culture and history
        "historical_temple_shrine" => "bgm_japanese_koto",
        "historical_castle" => "bgm_epic_orchestra",
        "museum_art" => "bgm_classical_piano",
        // Food and cafes
        "food_restaurant" => "bgm_dinner_jazz",
        "food_sweets" => "bgm_cute_pop",
        "indoor_cafe" => "bgm_cafe_bossanova",
        "alcohol_bar" => "bgm_moody_jazz_bar",
        // Transit and relaxation
        "transport_train" => "bgm_travel_train",
        "transport_drive" => "bgm_driving_rock",
        "transport_airport" => "bgm_airport_lounge",
        "indoor_hotel" => "bgm_relaxing_spa",
        "relax_onsen" => "bgm_water_sound",
        _ => "bgm_acoustic_guitar",
    }
}

/// Stamp for an emotion label. Unknown labels get the star default.
pub fn emotion_stamp_id(emotion: &str) -> &'static str {
    match emotion {
        // Basic emotions
        "joy" => "stamp_big_smile",
        "excitement" => "stamp_party_popper",
        "peaceful" => "stamp_dove",
        "relaxed" => "stamp_relax",
        "contemplative" => "stamp_thinking",
        "traditional_japan" => "stamp_tea_cup",
        "romantic" => "stamp_heart_pink",
        "nostalgic" => "stamp_film_camera",
        "delicious" => "stamp_yummy_face",
        "tired" => "stamp_sleeping_zzz",
        "surprise" => "stamp_exclamation",
        "sadness" => "stamp_crying_face",
        // Reactions
        "laughter" => "stamp_lol_face",
        "anger" => "stamp_angry_vein",
        "confused" => "stamp_question_mark",
        "cool" => "stamp_sunglasses",
        "love" => "stamp_heart_eyes",
        "shock" => "stamp_scream_face",
        "shy" => "stamp_blushing_face",
        "gratitude" => "stamp_praying_hands",
        "cheers" => "stamp_clinking_beer",
        "agreement" => "stamp_ok_hand",
        "refusal" => "stamp_cross_arms",
        // Activities
        "working" => "stamp_laptop",
        "studying" => "stamp_pencil_books",
        "shopping" => "stamp_shopping_bag",
        "traveling" => "stamp_airplane",
        "driving" => "stamp_car",
        "train_trip" => "stamp_train",
        "walking" => "stamp_sneakers",
        "photography" => "stamp_camera_flash",
        "music" => "stamp_musical_note",
        "sports" => "stamp_soccer_ball",
        "art" => "stamp_palette",
        "gaming" => "stamp_game_controller",
        // Places and sightseeing
        "sightseeing" => "stamp_binoculars",
        "historic" => "stamp_temple",
        "modern_city" => "stamp_city_night",
        "nature" => "stamp_mountain",
        "beach" => "stamp_beach_umbrella",
        "park" => "stamp_bench_tree",
        "amusement_park" => "stamp_ferris_wheel",
        "museum" => "stamp_column",
        // Animals
        "zoo" => "stamp_zoo",
        "pet" => "stamp_pet",
        "carnivore" => "stamp_carnivore",
        "herbivores" => "stamp_herbivores",
        "fish" => "stamp_fish",
        "insect" => "stamp_insect",
        // Weather and time of day
        "sunny" => "stamp_sun",
        "rainy" => "stamp_umbrella_rain",
        "cloudy" => "stamp_cloud",
        "snowy" => "stamp_snowman",
        "morning" => "stamp_sunrise",
        "night" => "stamp_moon_stars",
        // Misc
        "idea" => "stamp_light_bulb",
        "lucky" => "stamp_clover",
        "urgent" => "stamp_alarm_clock",
        "money" => "stamp_yen_bag",
        "health" => "stamp_pill_medical",
        _ => "stamp_star",
    }
}
