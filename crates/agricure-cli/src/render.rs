//! Plain-text output.

use agricure_core::{Recommendation, StoredRecommendation, UserProfile};

pub fn print_profile(profile: &UserProfile) {
    println!("Name:      {}", profile.display_name());
    println!("Email:     {}", profile.email);
    println!("Location:  {}", profile.farm_location.as_deref().unwrap_or("-"));
    println!("Phone:     {}", profile.phone.as_deref().unwrap_or("-"));
    match (profile.farm_size, profile.farm_size_unit.as_deref()) {
        (Some(size), Some(unit)) => println!("Farm size: {} {}", size, unit),
        (Some(size), None) => println!("Farm size: {}", size),
        _ => println!("Farm size: -"),
    }
}

pub fn print_recommendation(rec: &Recommendation) {
    println!(
        "ML prediction: {} ({:.1}% confidence)",
        rec.ml_prediction.fertilizer, rec.ml_prediction.confidence
    );
    println!();

    for (label, plan) in [
        ("Primary", &rec.primary_fertilizer),
        ("Secondary", &rec.secondary_fertilizer),
    ] {
        println!("{} fertilizer: {} ({})", label, plan.name, plan.amount);
        println!("  {}", plan.reason);
        println!("  Application: {}", plan.application_method);
    }
    println!();

    println!("Organic options:");
    for option in &rec.organic_options {
        println!("  - {} ({}): {}", option.name, option.amount, option.benefits);
        println!("    {}", option.application_timing);
    }
    println!();

    println!("Timing:");
    println!("  Primary:   {}", rec.application_timing.primary);
    println!("  Secondary: {}", rec.application_timing.secondary);
    println!("  Organic:   {}", rec.application_timing.organic);
    println!();

    let cost = &rec.cost_estimate;
    println!("Estimated cost:");
    println!("  Primary:   {}", cost.primary);
    println!("  Secondary: {}", cost.secondary);
    println!("  Organic:   {}", cost.organic);
    println!("  Total:     {}", cost.total);
    println!();

    let analysis = &rec.soil_condition_analysis;
    println!(
        "Soil: pH {}, moisture {}",
        analysis.ph_status, analysis.moisture_status
    );
    if !analysis.nutrient_deficiency.is_empty() {
        let names: Vec<&str> = analysis.nutrient_deficiency.iter().map(|n| n.as_str()).collect();
        println!("Deficient: {}", names.join(", "));
    }
    for line in &analysis.recommendations {
        println!("  - {}", line);
    }
}

pub fn print_history(records: &[StoredRecommendation]) {
    if records.is_empty() {
        println!("No recommendations yet");
        return;
    }
    for record in records {
        println!(
            "{}  {}  {} ({} {})  {} / {}  {} [{}]  {}",
            record.id,
            record.created_at,
            record.field_name,
            record.field_size,
            record.field_size_unit,
            record.crop_type,
            record.soil_type,
            record.ml_prediction.fertilizer,
            record.confidence_band().as_str(),
            record.recommendations.cost_estimate.total,
        );
    }
}

pub fn print_record(record: &StoredRecommendation) {
    println!("{} ({} {})", record.field_name, record.field_size, record.field_size_unit);
    println!("Created: {}", record.created_at);
    println!("Crop: {}   Soil: {}", record.crop_type, record.soil_type);
    println!(
        "pH {}  N {}  P {}  K {}  Temp {}°C  Humidity {}%  Moisture {}%",
        record.soil_ph,
        record.nitrogen,
        record.phosphorus,
        record.potassium,
        record.temperature,
        record.humidity,
        record.soil_moisture,
    );
    println!();
    print_recommendation(&record.recommendations);
}
