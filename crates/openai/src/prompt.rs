use model::place::PlaceSummary;

use crate::ChatMessage;

const SYSTEM_PROMPT: &str = "\
You are an experienced SEO copywriter for an online directory of local \
places. Craft concise descriptions that highlight convenience, work \
procedures, services, pricing, reviews, and any other relevant details. \
Write in an informative tone, no direct talk to the visitor. Do not \
mention that you are an AI language model. The description should be in \
English. Do not add content you're not 100% sure about. Avoid adding \
content which won't add value to the reader.";

/// Builds the message pair for one description request.
pub fn description_messages(place: &PlaceSummary) -> Vec<ChatMessage> {
    let rating = match (place.rating, place.user_rating_count) {
        (Some(rating), Some(count)) => {
            format!("{rating} based on {count} reviews")
        }
        (Some(rating), None) => rating.to_string(),
        _ => "not yet rated".to_owned(),
    };

    let user_prompt = format!(
        "Write a plain-text description (about 80-120 words, 1-2 short \
         paragraphs) for the following place.\n\
         Name: {name}.\n\
         Address: {address}.\n\
         Services offered: {services}.\n\
         Rating: {rating}.\n\
         Include nearby points of interest if relevant.\n\
         Important formatting rules:\n\
         - Do NOT include any headings, titles, markdown, links, or URLs.\n\
         - Start directly with the description sentence.\n\
         - Return only the description text and nothing else.",
        name = place.name,
        address = place.address.as_deref().unwrap_or("unknown"),
        services = if place.services.is_empty() {
            "unknown".to_owned()
        } else {
            place.services.join(", ")
        },
    );

    vec![
        ChatMessage {
            role: "system",
            content: SYSTEM_PROMPT.to_owned(),
        },
        ChatMessage {
            role: "user",
            content: user_prompt,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PlaceSummary {
        PlaceSummary {
            id: "A".to_owned(),
            name: "Acme Charging".to_owned(),
            slug: "acme-charging".to_owned(),
            address: Some("1 Main St, Springfield".to_owned()),
            rating: Some(4.2),
            user_rating_count: Some(17),
            services: vec!["electric_vehicle_charging_station".to_owned()],
            description: None,
        }
    }

    #[test]
    fn builds_a_system_and_a_user_message() {
        let messages = description_messages(&summary());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains("Acme Charging"));
        assert!(messages[1].content.contains("4.2 based on 17 reviews"));
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let mut place = summary();
        place.address = None;
        place.rating = None;
        place.user_rating_count = None;
        place.services.clear();

        let messages = description_messages(&place);
        assert!(messages[1].content.contains("Address: unknown."));
        assert!(messages[1].content.contains("Rating: not yet rated."));
    }
}
