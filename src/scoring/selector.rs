use crate::scoring::grid::CandidateRow;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestSlot {
    pub day_of_week: u8,
    pub hour_of_day: u8,
    pub score: f64,
}

// Stable argmax: scan in generation order and keep the first strict
// improvement, so exact ties go to the earlier slot.
pub fn select_best(rows: &[CandidateRow], scores: &[f64]) -> Option<BestSlot> {
    let mut best: Option<(usize, f64)> = None;
    for (index, score) in scores.iter().enumerate().take(rows.len()) {
        match best {
            None => best = Some((index, *score)),
            Some((_, best_score)) if *score > best_score => best = Some((index, *score)),
            _ => {}
        }
    }
    best.map(|(index, score)| BestSlot {
        day_of_week: rows[index].day_of_week,
        hour_of_day: rows[index].hour_of_day,
        score,
    })
}
