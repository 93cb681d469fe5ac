//! Prompts and response schemas for the two completion calls.

use serde_json::{json, Value};

use crate::calendar::locale::month_name;

pub fn monthly_events_prompt(year: i32, month: u32) -> String {
    format!(
        r#"Ты — главный эксперт по экологической безопасности и отчетности в РФ.
Составь календарь событий на {month_name} {year} года.

Акцент на **Календарь Эколога {year}** (Росприроднадзор, Росстат, Водные ресурсы).

Категории:
1. **reporting**: Строгие дедлайны сдачи отчетности.
   - Включи формы: 2-ТП (воздух, отходы, водхоз, рекультивация, радиоактивность), 4-ОС.
   - Платежи и декларации: Декларация о плате за НВОС, Отчет о ПЭК, Экологический сбор, Кадастр отходов (федеральный/региональный).
   - Используй законодательно утвержденные сроки для {year} года (с учетом переноса выходных, если дедлайн выпадает на выходной).
   - Указывай название формы точно (например, "2-ТП (воздух)").

2. **holiday**: Профессиональные и международные экологические праздники.
   - День заповедников, День водно-болотных угодий, День воды, Час Земли, День Эколога (5 июня) и др.

Ответ должен быть кратким, профессиональным, на русском языке.
Верни строго JSON массив."#,
        month_name = month_name(month),
        year = year,
    )
}

pub fn daily_tip_prompt(date_key: &str) -> String {
    format!(
        r#"Дата: {date_key}.
Сгенерируй "Совет эксперта" для профессионального эколога на предприятии (РФ).

Контент (одно из):
1. Если сегодня или скоро дедлайн отчетности: напомни проверить актуальность ЭЦП, формы в Личном кабинете природопользователя (ЛКП).
2. Нормативка: напомни о важном пункте ФЗ-7 "Об охране окружающей среды" или ФЗ-89 "Об отходах", актуальном для текущего сезона.
3. Практика: совет по ведению журналов учета (ПОД-1, 2, 3), инвентаризации источников выбросов или паспортизации отходов.
4. Если праздник: краткий профессиональный факт.

Стиль: Деловой, полезный, лаконичный.
Верни строго JSON."#
    )
}

pub fn events_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "date": {
                    "type": "STRING",
                    "description": "Date in YYYY-MM-DD format"
                },
                "title": {
                    "type": "STRING",
                    "description": "Official name of the report or holiday (e.g., 'Сдача 2-ТП (воздух)')"
                },
                "description": {
                    "type": "STRING",
                    "description": "Brief details: who submits, which form to use, or holiday info."
                },
                "category": {
                    "type": "STRING",
                    "enum": ["reporting", "holiday", "other"],
                    "description": "Type of event"
                }
            },
            "required": ["date", "title", "description", "category"]
        }
    })
}

pub fn tip_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "date": { "type": "STRING" },
            "tip": {
                "type": "STRING",
                "description": "Expert advice for an ecologist regarding legislation or best practices."
            },
            "actionItem": {
                "type": "STRING",
                "description": "Specific action item for compliance or professional development."
            }
        },
        "required": ["date", "tip", "actionItem"]
    })
}
