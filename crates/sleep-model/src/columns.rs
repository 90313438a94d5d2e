//! Column names of the sleep health and lifestyle dataset.

pub const GENDER: &str = "Gender";
pub const AGE: &str = "Age";
pub const OCCUPATION: &str = "Occupation";
pub const SLEEP_DURATION: &str = "Sleep Duration";
pub const QUALITY_OF_SLEEP: &str = "Quality of Sleep";
pub const PHYSICAL_ACTIVITY_LEVEL: &str = "Physical Activity Level";
pub const STRESS_LEVEL: &str = "Stress Level";
pub const BMI_CATEGORY: &str = "BMI Category";
pub const BLOOD_PRESSURE: &str = "Blood Pressure";
pub const HEART_RATE: &str = "Heart Rate";
pub const DAILY_STEPS: &str = "Daily Steps";
pub const SLEEP_DISORDER: &str = "Sleep Disorder";

/// Derived from [`BLOOD_PRESSURE`] by the compound split.
pub const SYSTOLIC_BP: &str = "Systolic BP";
/// Derived from [`BLOOD_PRESSURE`] by the compound split.
pub const DIASTOLIC_BP: &str = "Diastolic BP";

/// Columns encoded by a default pipeline run.
pub const CATEGORICAL_COLUMNS: [&str; 4] = [GENDER, OCCUPATION, BMI_CATEGORY, SLEEP_DISORDER];

/// Columns plotted as histograms.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    AGE,
    SLEEP_DURATION,
    QUALITY_OF_SLEEP,
    PHYSICAL_ACTIVITY_LEVEL,
    STRESS_LEVEL,
    HEART_RATE,
    DAILY_STEPS,
];

/// Variable pairs `(x, y)` studied by correlation, regression and scatter plots.
pub const STUDY_PAIRS: [(&str, &str); 5] = [
    (SLEEP_DURATION, QUALITY_OF_SLEEP),
    (STRESS_LEVEL, HEART_RATE),
    (STRESS_LEVEL, QUALITY_OF_SLEEP),
    (SLEEP_DURATION, STRESS_LEVEL),
    (QUALITY_OF_SLEEP, HEART_RATE),
];

/// Blood pressure columns produced by the compound split.
pub const BP_COLUMNS: [&str; 2] = [SYSTOLIC_BP, DIASTOLIC_BP];
