/// Titles imported when none are given on the command line.
pub const DEFAULT_TITLES: [&str; 40] = [
    "The Shawshank Redemption",
    "The Godfather",
    "The Dark Knight",
    "Pulp Fiction",
    "Forrest Gump",
    "Schindler's List",
    "The Lord of the Rings: The Return of the King",
    "Fight Club",
    "The Matrix",
    "Inception",
    "The Silence of the Lambs",
    "The Green Mile",
    "The Godfather: Part II",
    "The Lord of the Rings: The Fellowship of the Ring",
    "Goodfellas",
    "The Lord of the Rings: The Two Towers",
    "The Usual Suspects",
    "Se7en",
    "The Pianist",
    "Gladiator",
    "The Departed",
    "Saving Private Ryan",
    "The Prestige",
    "The Lion King",
    "American History X",
    "Braveheart",
    "The Shining",
    "The Intouchables",
    "The Terminator",
    "The Sixth Sense",
    "Interstellar",
    "Back to the Future",
    "Django Unchained",
    "The Avengers",
    "The Dark Knight Rises",
    "Inglourious Basterds",
    "The Matrix Reloaded",
    "The Matrix Revolutions",
    "Star Wars: Episode IV - A New Hope",
    "Star Wars: Episode V - The Empire Strikes Back",
];

/// Titles passed as arguments replace the built-in catalog.
pub fn resolve_titles<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let titles: Vec<String> = args
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if titles.is_empty() {
        DEFAULT_TITLES.iter().map(|t| t.to_string()).collect()
    } else {
        titles
    }
}
