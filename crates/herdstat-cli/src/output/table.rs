use herdstat_core::aggregate::{AiOutcome, Bucket, MilkTotal};
use herdstat_core::metrics::GroupSuccess;
use herdstat_core::FarmAssessment;
use rust_decimal::Decimal;

fn or_na(value: Option<Decimal>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.1}{}", v, suffix),
        None => "N/A".to_string(),
    }
}

pub fn print(assessment: &FarmAssessment) {
    let m = &assessment.metrics;

    println!("=== {} ===\n", assessment.farm_name);

    println!("  Herd composition ({} animals)", m.total_animals);
    for (category, count) in m.herd_composition.iter() {
        println!(
            "    {:<22} {:>5}  {:>6.1}%",
            category.label(),
            count,
            m.herd_composition.share_pct(category, m.total_animals)
        );
    }
    if m.herd_composition.unclassified > 0 {
        println!("    {:<22} {:>5}", "Unclassified", m.herd_composition.unclassified);
    }
    let types: Vec<String> = m
        .animal_types
        .iter()
        .map(|(kind, count)| format!("{kind} {count}"))
        .collect();
    if !types.is_empty() {
        println!("    Types: {}", types.join(", "));
    }
    println!();

    println!("  Milk production");
    println!("    Total                  {:.1} L", m.total_milk_production);
    println!("    Milking cows           {}", m.milking_cows);
    println!("    Average per cow        {:.1} L", m.avg_milk_per_cow);
    if let Some(ref month) = m.peak_month {
        println!("    Peak                   {:.1} L ({month})", m.peak_milk_production);
    }
    if let Some(ref month) = m.lowest_month {
        println!("    Lowest                 {:.1} L ({month})", m.lowest_milk_production);
    }
    println!("    Growth rate            {}", or_na(m.growth_rate, "%"));
    print_milk_series("Monthly", &m.monthly_milk);
    print_milk_series("Seasonal", &m.seasonal_milk);
    println!();

    println!("  Artificial insemination");
    println!("    Total AI               {}", m.total_ai);
    println!("    Pregnant               {}", m.pregnant_count);
    println!("    Success rate           {:.1}%", m.pregnancy_rate);
    for (status, count) in &m.pregnancy_status {
        println!("      {:<20} {:>5}", status.to_string(), count);
    }
    print_groups("Technicians", &m.technician_performance);
    print_groups("Bull breeds", &m.breed_performance);
    print_ai_series("Seasonal", &m.seasonal_ai);
    println!();

    let rating = &assessment.rating;
    println!("  Rating: {}\n", rating.tier);
    print_list("Strengths", &rating.strengths);
    print_list("Areas for improvement", &rating.weaknesses);
    print_list("Recommendations", &rating.recommendations);
}

fn print_milk_series(title: &str, series: &[Bucket<MilkTotal>]) {
    if series.is_empty() {
        return;
    }
    println!("    {title}:");
    for bucket in series {
        println!(
            "      {:<16} {:>12.1} L  ({} records)",
            bucket.label, bucket.value.production, bucket.value.records
        );
    }
}

fn print_ai_series(title: &str, series: &[Bucket<AiOutcome>]) {
    if series.is_empty() {
        return;
    }
    println!("    {title}:");
    for bucket in series {
        println!(
            "      {:<16} {:>3}/{:<3} {:>6.1}%",
            bucket.label, bucket.value.pregnant, bucket.value.total, bucket.value.success_rate
        );
    }
}

fn print_groups(title: &str, groups: &[GroupSuccess]) {
    if groups.is_empty() {
        return;
    }
    let width = groups.iter().map(|g| g.name.len()).max().unwrap_or(10).max(10);
    println!("    {title}:");
    for group in groups {
        println!(
            "      {:<width$} {:>3}/{:<3} {:>6.1}%",
            group.name,
            group.pregnant,
            group.total,
            group.success_rate,
            width = width
        );
    }
}

fn print_list(title: &str, items: &[String]) {
    println!("  {title}:");
    for item in items {
        println!("    - {item}");
    }
    println!();
}
