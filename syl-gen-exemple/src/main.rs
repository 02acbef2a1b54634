use syl_gen_core::corpus::Gender;
use syl_gen_core::model::export::statistics_path;
use syl_gen_core::model::generation_request::GenerationRequest;
use syl_gen_core::model::generator::{generate, Generator};
use syl_gen_core::model::transition_table::TransitionTable;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load every corpus file of the "data" directory
    // Files are named "<anything>-<language>.txt"
    let generator = Generator::new("./data")?;
    println!("Available languages: {}", generator.get_languages().join(", "));

    // Request 10 names with the default settings
    let mut request = GenerationRequest::new(10);

    // Pool several languages together
    request.set_languages(["japonais", "allemand", "orc"])?;

    // Only some genders ('m', 'f' or 'x')
    request.set_genders(&Gender::ALL)?;

    // Names longer than 5 characters are never produced
    request.max_length = 5;

    // Write the syllable statistics as JSON in "syllables/"
    request.export_statistics = true;

    // Report how many walks it took
    request.report_attempts = true;

    // Without a ceiling, generation retries until it has enough names
    request.max_attempts = Some(1_000_000);

    // An empty selection is rejected
    match request.set_languages(Vec::<String>::new()) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("At least one language is required"),
    }

    let outcome = generator.generate_names(&request)?;
    for (i, name) in outcome.names.iter().enumerate() {
        println!("Name {} : {}", i + 1, name);
    }
    if let Some(attempts) = outcome.attempts {
        println!("\n{} names generated in {} attempts", outcome.names.len(), attempts);
    }
    if let Some(error) = &outcome.export_error {
        println!("Statistics were not exported: {}", error);
    }

    // A selection with no syllable pair fails instead of looping forever
    let mut unknown = GenerationRequest::new(3);
    unknown.set_languages(["klingon"])?;
    match generator.generate_names(&unknown) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{}", e),
    }

    // Tables can be snapshotted and reused without the corpus
    let table = generator.build_table(&request.selection());
    let snapshot = statistics_path(&request.export_dir, &table).with_extension("bin");
    std::fs::create_dir_all(&request.export_dir)?;
    table.save(&snapshot)?;

    let table = TransitionTable::load(&snapshot)?;
    let excluded = generator.corpus().name_set(table.selection());
    let generation = generate(&table, &excluded, 5, 8, Some(1_000_000), &mut rand::rng())?;
    println!("\nFrom snapshot {}:", snapshot.display());
    for (i, name) in generation.names.iter().enumerate() {
        println!("Name {} : {}", i + 1, name);
    }

    Ok(())
}
