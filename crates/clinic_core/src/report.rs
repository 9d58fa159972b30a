//! Plain-text run summary.

use crate::stats::{ClinicStats, DoctorStats};

/// Short upper-case tag for a doctor's specialty, e.g. `CARD`.
pub fn specialty_tag(doctor: &DoctorStats) -> String {
    doctor
        .specialty
        .as_str()
        .chars()
        .take(4)
        .collect::<String>()
        .to_uppercase()
}

/// One line per doctor: `M1 [CLIN]: 42.0% (Atend: 7)`.
pub fn doctor_line(doctor: &DoctorStats) -> String {
    format!(
        "M{} [{}]: {:.1}% (Atend: {})",
        doctor.id + 1,
        specialty_tag(doctor),
        doctor.occupancy_percent,
        doctor.served
    )
}

/// Render the summary shown after a run.
pub fn render(stats: &ClinicStats) -> String {
    let mut lines = vec![
        format!("Doentes atendidos: {}", stats.patients_served),
        format!("Ocupacao media: {:.1}%", stats.mean_occupancy),
        format!("Espera media: {:.2} min", stats.mean_wait),
        format!("Consulta media: {:.2} min", stats.mean_consultation),
        format!("Tempo na clinica: {:.2} min", stats.mean_time_in_clinic),
        format!(
            "Fila media: {:.2} | Fila max: {}",
            stats.mean_queue, stats.max_queue
        ),
    ];
    lines.extend(stats.per_doctor.iter().map(doctor_line));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
