use crate::models::BreedPrediction;
use crate::stats::PixelStats;

pub const TOP_K: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breed {
  Holstein,
  Angus,
  Hereford,
  Charolais,
  BrownSwiss,
  Jersey,
  Brahman,
  Simmental,
}

impl Breed {
  // equal scores keep this order after ranking
  pub const ALL: [Breed; 8] = [
    Breed::Holstein,
    Breed::Angus,
    Breed::Hereford,
    Breed::Charolais,
    Breed::BrownSwiss,
    Breed::Jersey,
    Breed::Brahman,
    Breed::Simmental,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Breed::Holstein => "Holstein",
      Breed::Angus => "Angus",
      Breed::Hereford => "Hereford",
      Breed::Charolais => "Charolais",
      Breed::BrownSwiss => "Brown Swiss",
      Breed::Jersey => "Jersey",
      Breed::Brahman => "Brahman",
      Breed::Simmental => "Simmental",
    }
  }

  fn index(self) -> usize {
    self as usize
  }
}

struct Rule {
  breed: Breed,
  applies: fn(&PixelStats) -> bool,
  weight: fn(&PixelStats) -> f64,
}

const RULES: &[Rule] = &[
  Rule { breed: Breed::Angus, applies: is_dark, weight: darkness },
  Rule { breed: Breed::Charolais, applies: is_light, weight: lightness },
  Rule { breed: Breed::Hereford, applies: is_red_dominant, weight: hereford_red },
  Rule { breed: Breed::Simmental, applies: is_red_dominant, weight: simmental_red },
  Rule { breed: Breed::Holstein, applies: always, weight: contrast },
  Rule { breed: Breed::Jersey, applies: is_warm, weight: jersey_warmth },
  Rule { breed: Breed::BrownSwiss, applies: is_warm, weight: brown_swiss_warmth },
  Rule { breed: Breed::Brahman, applies: is_grey_midtone, weight: brahman_grey },
];

fn always(_: &PixelStats) -> bool {
  true
}

fn is_dark(s: &PixelStats) -> bool {
  s.avg_luminance < 0.35
}

fn darkness(s: &PixelStats) -> f64 {
  (0.35 - s.avg_luminance) * 2.0
}

fn is_light(s: &PixelStats) -> bool {
  s.avg_luminance > 0.75
}

fn lightness(s: &PixelStats) -> f64 {
  (s.avg_luminance - 0.75) * 2.0
}

fn is_red_dominant(s: &PixelStats) -> bool {
  s.avg_r > s.avg_g && s.avg_r > s.avg_b
}

fn red_excess(s: &PixelStats) -> f64 {
  s.avg_r - s.avg_g.max(s.avg_b)
}

fn hereford_red(s: &PixelStats) -> f64 {
  red_excess(s) * 1.2
}

fn simmental_red(s: &PixelStats) -> f64 {
  red_excess(s) * 0.6
}

// spotting shows up as luminance spread
fn contrast(s: &PixelStats) -> f64 {
  (s.std_luminance * 2.0).min(1.0)
}

fn is_warm(s: &PixelStats) -> bool {
  s.avg_r > s.avg_b && s.avg_luminance > 0.45 && s.avg_luminance < 0.7
}

fn jersey_warmth(_: &PixelStats) -> f64 {
  0.8
}

fn brown_swiss_warmth(_: &PixelStats) -> f64 {
  0.5
}

fn is_grey_midtone(s: &PixelStats) -> bool {
  let greyish = (s.avg_r - s.avg_g).abs() < 0.05 && (s.avg_g - s.avg_b).abs() < 0.05;
  greyish && s.avg_luminance > 0.5 && s.avg_luminance < 0.75
}

fn brahman_grey(_: &PixelStats) -> f64 {
  0.6
}

pub fn raw_scores(stats: &PixelStats) -> [(Breed, f64); 8] {
  let mut scores = Breed::ALL.map(|b| (b, 0.0f64));
  for rule in RULES {
    if (rule.applies)(stats) {
      scores[rule.breed.index()].1 += (rule.weight)(stats);
    }
  }
  scores
}

pub fn score(stats: &PixelStats) -> Vec<BreedPrediction> {
  let mut ranked: Vec<(Breed, f64)> = raw_scores(stats)
    .into_iter()
    .map(|(breed, s)| (breed, s.max(0.0)))
    .collect();
  // stable, so ties stay in candidate order
  ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
  ranked.truncate(TOP_K);

  let total: f64 = ranked.iter().map(|(_, s)| s).sum();
  let divisor = if total == 0.0 { 1.0 } else { total };

  ranked
    .into_iter()
    .map(|(breed, s)| BreedPrediction::new(breed.label(), s / divisor))
    .collect()
}

pub fn analyze(bytes: &[u8]) -> Vec<BreedPrediction> {
  let img = match image::load_from_memory(bytes) {
    Ok(img) => img,
    Err(_) => return Vec::new(),
  };
  match PixelStats::from_image(&img) {
    Some(stats) => score(&stats),
    None => Vec::new(),
  }
}
