use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreedSize {
  Small,
  Medium,
  Large,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BreedImage {
  pub url: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub credit: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BreedInfo {
  pub name: String,
  pub origin: String,
  pub purpose: Vec<String>,
  pub description: String,
  pub images: Vec<BreedImage>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub colors: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub size: Option<BreedSize>,
}

pub struct BreedCatalog {
  breeds: Vec<BreedInfo>,
}

impl BreedCatalog {
  pub fn new(breeds: Vec<BreedInfo>) -> Self {
    Self { breeds }
  }

  pub fn builtin() -> Self {
    Self::new(vec![
      breed(
        "Holstein",
        "Netherlands",
        &["Dairy"],
        "Holsteins are easily recognized by their distinctive black-and-white spotted pattern and are the world's highest-producing dairy breed.",
        vec![
          credited(
            "https://upload.wikimedia.org/wikipedia/commons/2/2e/Holstein_Friesian_cow.jpg",
            "Wikimedia Commons",
          ),
          image("https://upload.wikimedia.org/wikipedia/commons/7/7d/Holstein_cow.jpg"),
        ],
        &["black", "white"],
        BreedSize::Large,
      ),
      breed(
        "Angus",
        "Scotland",
        &["Beef"],
        "Angus cattle are typically solid black (or red in Red Angus), known for excellent marbling and beef quality.",
        vec![
          image("https://upload.wikimedia.org/wikipedia/commons/3/3d/Black_Angus_cow.jpg"),
          image("https://upload.wikimedia.org/wikipedia/commons/9/95/Angus_cattle.jpg"),
        ],
        &["black"],
        BreedSize::Medium,
      ),
      breed(
        "Hereford",
        "England",
        &["Beef"],
        "Herefords have a red-brown body with a white face, crest, underline, and often white on the legs and switch.",
        vec![
          image("https://upload.wikimedia.org/wikipedia/commons/6/6f/Hereford_cow.jpg"),
          image("https://upload.wikimedia.org/wikipedia/commons/2/2a/Hereford_bull.jpg"),
        ],
        &["red", "white"],
        BreedSize::Large,
      ),
      breed(
        "Brown Swiss",
        "Switzerland",
        &["Dairy"],
        "Brown Swiss are sturdy dairy cattle with a solid brown coat, renowned for milk with high butterfat and protein.",
        vec![image("https://upload.wikimedia.org/wikipedia/commons/e/e9/Brown_Swiss_cow.jpg")],
        &["brown", "grey"],
        BreedSize::Large,
      ),
      breed(
        "Jersey",
        "Jersey (Channel Islands)",
        &["Dairy"],
        "A smaller dairy breed with light brown to fawn coloring, Jerseys are known for rich, high-butterfat milk and docile nature.",
        vec![image("https://upload.wikimedia.org/wikipedia/commons/8/8b/Jersey_cow.jpg")],
        &["fawn", "light brown"],
        BreedSize::Small,
      ),
      breed(
        "Brahman",
        "India",
        &["Beef", "Draft"],
        "Brahman cattle have a distinctive hump over the shoulders, long ears, and loose skin. They are heat-tolerant and hardy.",
        vec![image("https://upload.wikimedia.org/wikipedia/commons/3/34/Brahman_cow.jpg")],
        &["grey", "red"],
        BreedSize::Large,
      ),
      breed(
        "Charolais",
        "France",
        &["Beef"],
        "Charolais are large, white to cream-colored cattle prized for muscularity and growth rate.",
        vec![image("https://upload.wikimedia.org/wikipedia/commons/5/5e/Charolais_cattle.jpg")],
        &["white", "cream"],
        BreedSize::Large,
      ),
      breed(
        "Simmental",
        "Switzerland",
        &["Dual-purpose"],
        "Simmentals are often red and white with a white face, used for both milk and beef with strong growth and adaptability.",
        vec![image("https://upload.wikimedia.org/wikipedia/commons/4/40/Simmental_cow.jpg")],
        &["red", "white"],
        BreedSize::Large,
      ),
      breed(
        "Guernsey",
        "Guernsey (Channel Islands)",
        &["Dairy"],
        "Guernseys are a dairy breed with fawn to red coats and white markings, producing rich golden-colored milk.",
        vec![image("https://upload.wikimedia.org/wikipedia/commons/6/60/Guernsey_cow.jpg")],
        &["fawn", "red", "white"],
        BreedSize::Medium,
      ),
      breed(
        "Ayrshire",
        "Scotland",
        &["Dairy"],
        "Ayrshires are red and white dairy cattle known for vigor and efficiency, with strong udder conformation.",
        vec![image("https://upload.wikimedia.org/wikipedia/commons/4/4f/Ayrshire_cow.jpg")],
        &["red", "white"],
        BreedSize::Medium,
      ),
      breed(
        "Gyr",
        "India",
        &["Dairy"],
        "Gyr (Gir) are zebu cattle with distinctive long, pendulous ears and a convex forehead, adapted to heat with good milk yields.",
        vec![image("https://upload.wikimedia.org/wikipedia/commons/3/37/Gir_cow.jpg")],
        &["red", "white", "spotted"],
        BreedSize::Medium,
      ),
    ])
  }

  pub fn normalize_breed_name(&self, name: &str) -> String {
    self
      .find(name)
      .map(|info| info.name.clone())
      .unwrap_or_else(|| name.to_string())
  }

  pub fn lookup(&self, name: &str) -> Option<&BreedInfo> {
    self.find(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &BreedInfo> {
    self.breeds.iter()
  }

  pub fn len(&self) -> usize {
    self.breeds.len()
  }

  pub fn is_empty(&self) -> bool {
    self.breeds.is_empty()
  }

  fn find(&self, name: &str) -> Option<&BreedInfo> {
    let wanted = name.to_lowercase();
    self.breeds.iter().find(|b| b.name.to_lowercase() == wanted)
  }
}

fn breed(
  name: &str,
  origin: &str,
  purpose: &[&str],
  description: &str,
  images: Vec<BreedImage>,
  colors: &[&str],
  size: BreedSize,
) -> BreedInfo {
  BreedInfo {
    name: name.to_string(),
    origin: origin.to_string(),
    purpose: purpose.iter().map(|p| p.to_string()).collect(),
    description: description.to_string(),
    images,
    colors: Some(colors.iter().map(|c| c.to_string()).collect()),
    size: Some(size),
  }
}

fn image(url: &str) -> BreedImage {
  BreedImage {
    url: url.to_string(),
    credit: None,
  }
}

fn credited(url: &str, credit: &str) -> BreedImage {
  BreedImage {
    url: url.to_string(),
    credit: Some(credit.to_string()),
  }
}
