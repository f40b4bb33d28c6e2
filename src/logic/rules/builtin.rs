use super::{AdvisoryRule, Condition};

/// Shipped advisory table, used unless a config disables it.
///
/// Priority bands:
/// - 10: hazards that override everything (frost, snow, storms)
/// - 20-30: heavy rain, heat, wet-foliage and disease pressure
/// - 40-60: favorable sowing and transplanting windows, pest pressure
/// - 70-80: general seasonal guidance and the open spraying window
///
/// Temperature and humidity ranges are inclusive; "above"/"below" are strict.
pub fn builtin_rules() -> Vec<AdvisoryRule> {
    vec![
        AdvisoryRule::new("storm_hold", 10, Condition::contains("thunderstorm"))
            .with_name("Thunderstorm hold")
            .with_planting(
                "Thunderstorms in the area: postpone sowing and field work until \
                 conditions settle.",
            )
            .with_pesticide(
                "Do not spray during thunderstorms. Wind drift and wash-off make \
                 applications ineffective and unsafe.",
            ),
        AdvisoryRule::new("snow_hold", 10, Condition::contains("snow"))
            .with_name("Snow hold")
            .with_planting(
                "Snow on the ground: no sowing. Protect perennials and keep seed stock dry.",
            )
            .with_pesticide("Skip pesticide applications on snow-covered or frozen crops."),
        // Strictly below 2°C
        AdvisoryRule::new("frost_risk", 10, Condition::TemperatureBelow(2.0))
            .with_name("Frost risk")
            .with_planting(
                "Frost risk: delay sowing and cover seedlings with mulch or row covers \
                 overnight.",
            ),
        AdvisoryRule::new(
            "heavy_rain_hold",
            20,
            Condition::all([
                Condition::contains("rain"),
                Condition::any([
                    Condition::contains("heavy"),
                    Condition::contains("extreme"),
                    Condition::contains("very"),
                ]),
            ]),
        )
        .with_name("Heavy rain hold")
        .with_planting(
            "Heavy rain: avoid sowing to prevent seed wash-out and soil compaction. \
             Clear drainage channels.",
        )
        .with_pesticide("Heavy rain will wash sprays off; postpone pesticide application."),
        // Strictly above 35°C
        AdvisoryRule::new("heat_stress", 20, Condition::TemperatureAbove(35.0))
            .with_name("Heat stress")
            .with_planting(
                "Extreme heat: avoid transplanting. Irrigate early in the morning and \
                 shade young plants.",
            )
            .with_pesticide(
                "Spray only in the early morning or evening; high heat increases \
                 evaporation and leaf burn.",
            ),
        AdvisoryRule::new(
            "wet_foliage",
            30,
            Condition::any([Condition::contains("rain"), Condition::contains("drizzle")]),
        )
        .with_name("Wet foliage")
        .with_pesticide(
            "Rain or drizzle present: delay spraying until foliage is dry and no rain \
             is expected for at least 6 hours.",
        ),
        // Humidity strictly above 80%, temperature 18-30°C inclusive
        AdvisoryRule::new(
            "fungal_pressure",
            30,
            Condition::all([
                Condition::HumidityAbove(80),
                Condition::temperature_between(18.0, 30.0),
            ]),
        )
        .with_name("Fungal disease pressure")
        .with_pesticide(
            "Warm and humid: conditions favor blight and mildew. Scout leaves closely \
             and consider a preventive fungicide.",
        ),
        AdvisoryRule::new(
            "light_rain_sowing",
            40,
            Condition::all([
                Condition::contains("rain"),
                Condition::temperature_between(15.0, 28.0),
            ]),
        )
        .with_name("Light rain sowing")
        .with_planting(
            "Light rain with mild temperatures: good soil moisture for sowing beans, \
             peas and leafy greens.",
        ),
        AdvisoryRule::new(
            "warm_clear_sowing",
            50,
            Condition::all([
                Condition::temperature_between(20.0, 30.0),
                Condition::contains("clear"),
            ]),
        )
        .with_name("Warm and clear sowing window")
        .with_planting(
            "Warm and clear: ideal conditions for sowing maize, sorghum and beans. \
             Irrigate after sowing if the soil is dry.",
        ),
        AdvisoryRule::new(
            "overcast_transplanting",
            60,
            Condition::all([
                Condition::temperature_between(15.0, 25.0),
                Condition::contains("cloud"),
            ]),
        )
        .with_name("Overcast transplanting")
        .with_planting(
            "Mild and overcast: good conditions for transplanting seedlings with less \
             transplant shock.",
        ),
        // Humidity strictly below 50%, temperature 25-35°C inclusive
        AdvisoryRule::new(
            "dry_pest_pressure",
            60,
            Condition::all([
                Condition::temperature_between(25.0, 35.0),
                Condition::HumidityBelow(50),
            ]),
        )
        .with_name("Dry-weather pest pressure")
        .with_pesticide(
            "Warm, dry weather favors aphids, mites and thrips. Scout crops and treat \
             hotspots if thresholds are exceeded.",
        ),
        AdvisoryRule::new(
            "cool_season_crops",
            70,
            Condition::all([
                Condition::temperature_between(8.0, 18.0),
                Condition::not(Condition::contains("rain")),
            ]),
        )
        .with_name("Cool-season crops")
        .with_planting(
            "Cool conditions: suitable for cabbage, kale, peas and potatoes.",
        ),
        AdvisoryRule::new(
            "spray_window",
            80,
            Condition::all([
                Condition::temperature_between(10.0, 30.0),
                Condition::humidity_between(40, 85),
                Condition::not(Condition::any([
                    Condition::contains("rain"),
                    Condition::contains("drizzle"),
                    Condition::contains("thunderstorm"),
                    Condition::contains("snow"),
                ])),
            ]),
        )
        .with_name("Open spraying window")
        .with_pesticide(
            "Good spraying window: dry with moderate temperature and humidity. Follow \
             label rates and avoid spraying in wind.",
        ),
    ]
}
