use super::Generator;
use crate::catalog::Catalog;
use crate::console;
use crate::console::Approve;

/// interactive acceptance of generated transpositions into the
/// catalog. every candidate is approved one at a time; openings that
/// already carry transpositions are skipped unless `append`, and
/// appending is itself confirmed per opening. returns the number of
/// newly accepted lines.
pub fn curate(
    catalog: &mut Catalog,
    generator: &Generator,
    approve: &mut dyn Approve,
    append: bool,
) -> usize {
    let mut accepted = 0;
    for (name, opening) in catalog.iter_mut() {
        if opening.is_system() {
            continue;
        }
        match &opening.transpositions {
            Some(_) if !append => {
                log::info!("skipping {}: transpositions already present", name);
                continue;
            }
            Some(_) => {
                let prompt = format!("Transpositions already present for {}. Add more?", name);
                if !approve.confirm(&prompt) {
                    continue;
                }
            }
            None => {}
        }
        println!("{}", console::header(&format!("Finding transpositions for: {}", name)));
        // a skipped search must not be mistaken for an empty result,
        // so the opening keeps whatever it had
        let candidates = match generator.enumerate(&opening.line()) {
            Some(candidates) => candidates,
            None => {
                log::warn!("leaving {} untouched: enumeration was skipped", name);
                continue;
            }
        };
        let existing = opening.transpositions.get_or_insert_with(Vec::new);
        for candidate in candidates {
            let text = candidate.to_string();
            if existing.contains(&text) {
                log::debug!("skipped {}", text);
                continue;
            }
            if approve.confirm(&format!("Is [{}] a plausible line?", text)) {
                existing.push(text);
                accepted += 1;
            }
        }
        for line in existing.iter() {
            println!(" * {}", line);
        }
    }
    accepted
}
