// src/reference/countries.rs
use super::{AreaSeed, EntityKind};

const fn country(
    code: i32,
    iso3: &'static str,
    name: &'static str,
    region: &'static str,
) -> AreaSeed {
    AreaSeed {
        code,
        iso3: Some(iso3),
        name,
        region: Some(region),
        kind: EntityKind::Country,
    }
}

const fn aggregate(code: i32, name: &'static str) -> AreaSeed {
    AreaSeed {
        code,
        iso3: None,
        name,
        region: None,
        kind: EntityKind::Region,
    }
}

/// Source area codes and their standard identity. Aggregates sit at the end.
pub(super) static FAO_AREAS: &[AreaSeed] = &[
    country(4, "AFG", "Afghanistan", "Asia"),
    country(8, "ALB", "Albania", "Europe"),
    country(12, "DZA", "Algeria", "Africa"),
    country(16, "ASM", "American Samoa", "Oceania"),
    country(20, "AND", "Andorra", "Europe"),
    country(24, "AGO", "Angola", "Africa"),
    country(28, "ATG", "Antigua and Barbuda", "Americas"),
    country(32, "ARG", "Argentina", "Americas"),
    country(51, "ARM", "Armenia", "Asia"),
    country(36, "AUS", "Australia", "Oceania"),
    country(40, "AUT", "Austria", "Europe"),
    country(31, "AZE", "Azerbaijan", "Asia"),
    country(44, "BHS", "Bahamas", "Americas"),
    country(48, "BHR", "Bahrain", "Asia"),
    country(50, "BGD", "Bangladesh", "Asia"),
    country(52, "BRB", "Barbados", "Americas"),
    country(112, "BLR", "Belarus", "Europe"),
    country(56, "BEL", "Belgium", "Europe"),
    country(84, "BLZ", "Belize", "Americas"),
    country(204, "BEN", "Benin", "Africa"),
    country(60, "BMU", "Bermuda", "Americas"),
    country(64, "BTN", "Bhutan", "Asia"),
    country(68, "BOL", "Bolivia", "Americas"),
    country(70, "BIH", "Bosnia and Herzegovina", "Europe"),
    country(72, "BWA", "Botswana", "Africa"),
    country(76, "BRA", "Brazil", "Americas"),
    country(96, "BRN", "Brunei Darussalam", "Asia"),
    country(100, "BGR", "Bulgaria", "Europe"),
    country(854, "BFA", "Burkina Faso", "Africa"),
    country(108, "BDI", "Burundi", "Africa"),
    country(132, "CPV", "Cabo Verde", "Africa"),
    country(116, "KHM", "Cambodia", "Asia"),
    country(120, "CMR", "Cameroon", "Africa"),
    country(124, "CAN", "Canada", "Americas"),
    country(140, "CAF", "Central African Republic", "Africa"),
    country(148, "TCD", "Chad", "Africa"),
    country(152, "CHL", "Chile", "Americas"),
    country(156, "CHN", "China", "Asia"),
    country(170, "COL", "Colombia", "Americas"),
    country(174, "COM", "Comoros", "Africa"),
    country(178, "COG", "Congo", "Africa"),
    country(180, "COD", "Democratic Republic of the Congo", "Africa"),
    country(184, "COK", "Cook Islands", "Oceania"),
    country(188, "CRI", "Costa Rica", "Americas"),
    country(384, "CIV", "Côte d'Ivoire", "Africa"),
    country(191, "HRV", "Croatia", "Europe"),
    country(192, "CUB", "Cuba", "Americas"),
    country(196, "CYP", "Cyprus", "Europe"),
    country(203, "CZE", "Czechia", "Europe"),
    country(208, "DNK", "Denmark", "Europe"),
    country(262, "DJI", "Djibouti", "Africa"),
    country(212, "DMA", "Dominica", "Americas"),
    country(218, "ECU", "Ecuador", "Americas"),
    country(818, "EGY", "Egypt", "Africa"),
    country(222, "SLV", "El Salvador", "Americas"),
    country(226, "GNQ", "Equatorial Guinea", "Africa"),
    country(232, "ERI", "Eritrea", "Africa"),
    country(233, "EST", "Estonia", "Europe"),
    country(748, "SWZ", "Eswatini", "Africa"),
    country(231, "ETH", "Ethiopia", "Africa"),
    country(234, "FRO", "Faroe Islands", "Europe"),
    country(242, "FJI", "Fiji", "Oceania"),
    country(246, "FIN", "Finland", "Europe"),
    country(250, "FRA", "France", "Europe"),
    country(266, "GAB", "Gabon", "Africa"),
    country(270, "GMB", "Gambia", "Africa"),
    country(268, "GEO", "Georgia", "Asia"),
    country(276, "DEU", "Germany", "Europe"),
    country(288, "GHA", "Ghana", "Africa"),
    country(300, "GRC", "Greece", "Europe"),
    country(304, "GRL", "Greenland", "Americas"),
    country(308, "GRD", "Grenada", "Americas"),
    country(320, "GTM", "Guatemala", "Americas"),
    country(324, "GIN", "Guinea", "Africa"),
    country(624, "GNB", "Guinea-Bissau", "Africa"),
    country(328, "GUY", "Guyana", "Americas"),
    country(332, "HTI", "Haiti", "Americas"),
    country(336, "VAT", "Vatican City", "Europe"),
    country(340, "HND", "Honduras", "Americas"),
    country(344, "HKG", "Hong Kong SAR", "Asia"),
    country(348, "HUN", "Hungary", "Europe"),
    country(352, "ISL", "Iceland", "Europe"),
    country(356, "IND", "India", "Asia"),
    country(360, "IDN", "Indonesia", "Asia"),
    country(364, "IRN", "Iran", "Asia"),
    country(368, "IRQ", "Iraq", "Asia"),
    country(372, "IRL", "Ireland", "Europe"),
    country(376, "ISR", "Israel", "Asia"),
    country(380, "ITA", "Italy", "Europe"),
    country(388, "JAM", "Jamaica", "Americas"),
    country(392, "JPN", "Japan", "Asia"),
    country(400, "JOR", "Jordan", "Asia"),
    country(398, "KAZ", "Kazakhstan", "Asia"),
    country(404, "KEN", "Kenya", "Africa"),
    country(296, "KIR", "Kiribati", "Oceania"),
    country(408, "PRK", "North Korea", "Asia"),
    country(410, "KOR", "South Korea", "Asia"),
    country(414, "KWT", "Kuwait", "Asia"),
    country(417, "KGZ", "Kyrgyzstan", "Asia"),
    country(418, "LAO", "Lao PDR", "Asia"),
    country(428, "LVA", "Latvia", "Europe"),
    country(422, "LBN", "Lebanon", "Asia"),
    country(426, "LSO", "Lesotho", "Africa"),
    country(430, "LBR", "Liberia", "Africa"),
    country(434, "LBY", "Libya", "Africa"),
    country(438, "LIE", "Liechtenstein", "Europe"),
    country(440, "LTU", "Lithuania", "Europe"),
    country(442, "LUX", "Luxembourg", "Europe"),
    country(446, "MAC", "Macao SAR", "Asia"),
    country(450, "MDG", "Madagascar", "Africa"),
    country(454, "MWI", "Malawi", "Africa"),
    country(458, "MYS", "Malaysia", "Asia"),
    country(462, "MDV", "Maldives", "Asia"),
    country(466, "MLI", "Mali", "Africa"),
    country(470, "MLT", "Malta", "Europe"),
    country(584, "MHL", "Marshall Islands", "Oceania"),
    country(478, "MRT", "Mauritania", "Africa"),
    country(480, "MUS", "Mauritius", "Africa"),
    country(484, "MEX", "Mexico", "Americas"),
    country(583, "FSM", "Micronesia", "Oceania"),
    country(498, "MDA", "Moldova", "Europe"),
    country(492, "MCO", "Monaco", "Europe"),
    country(496, "MNG", "Mongolia", "Asia"),
    country(499, "MNE", "Montenegro", "Europe"),
    country(504, "MAR", "Morocco", "Africa"),
    country(508, "MOZ", "Mozambique", "Africa"),
    country(104, "MMR", "Myanmar", "Asia"),
    country(516, "NAM", "Namibia", "Africa"),
    country(520, "NRU", "Nauru", "Oceania"),
    country(524, "NPL", "Nepal", "Asia"),
    country(528, "NLD", "Netherlands", "Europe"),
    country(554, "NZL", "New Zealand", "Oceania"),
    country(558, "NIC", "Nicaragua", "Americas"),
    country(562, "NER", "Niger", "Africa"),
    country(566, "NGA", "Nigeria", "Africa"),
    country(570, "NIU", "Niue", "Oceania"),
    country(578, "NOR", "Norway", "Europe"),
    country(512, "OMN", "Oman", "Asia"),
    country(586, "PAK", "Pakistan", "Asia"),
    country(585, "PLW", "Palau", "Oceania"),
    country(275, "PSE", "Palestine", "Asia"),
    country(591, "PAN", "Panama", "Americas"),
    country(598, "PNG", "Papua New Guinea", "Oceania"),
    country(600, "PRY", "Paraguay", "Americas"),
    country(604, "PER", "Peru", "Americas"),
    country(608, "PHL", "Philippines", "Asia"),
    country(616, "POL", "Poland", "Europe"),
    country(620, "PRT", "Portugal", "Europe"),
    country(634, "QAT", "Qatar", "Asia"),
    country(642, "ROU", "Romania", "Europe"),
    country(643, "RUS", "Russian Federation", "Europe"),
    country(646, "RWA", "Rwanda", "Africa"),
    country(659, "KNA", "Saint Kitts and Nevis", "Americas"),
    country(662, "LCA", "Saint Lucia", "Americas"),
    country(670, "VCT", "Saint Vincent and the Grenadines", "Americas"),
    country(882, "WSM", "Samoa", "Oceania"),
    country(674, "SMR", "San Marino", "Europe"),
    country(678, "STP", "Sao Tome and Principe", "Africa"),
    country(682, "SAU", "Saudi Arabia", "Asia"),
    country(686, "SEN", "Senegal", "Africa"),
    country(688, "SRB", "Serbia", "Europe"),
    country(690, "SYC", "Seychelles", "Africa"),
    country(694, "SLE", "Sierra Leone", "Africa"),
    country(702, "SGP", "Singapore", "Asia"),
    country(703, "SVK", "Slovakia", "Europe"),
    country(705, "SVN", "Slovenia", "Europe"),
    country(90, "SLB", "Solomon Islands", "Oceania"),
    country(706, "SOM", "Somalia", "Africa"),
    country(710, "ZAF", "South Africa", "Africa"),
    country(728, "SSD", "South Sudan", "Africa"),
    country(724, "ESP", "Spain", "Europe"),
    country(144, "LKA", "Sri Lanka", "Asia"),
    country(729, "SDN", "Sudan", "Africa"),
    country(740, "SUR", "Suriname", "Americas"),
    country(752, "SWE", "Sweden", "Europe"),
    country(756, "CHE", "Switzerland", "Europe"),
    country(760, "SYR", "Syrian Arab Republic", "Asia"),
    country(762, "TJK", "Tajikistan", "Asia"),
    country(834, "TZA", "Tanzania", "Africa"),
    country(764, "THA", "Thailand", "Asia"),
    country(626, "TLS", "Timor-Leste", "Asia"),
    country(768, "TGO", "Togo", "Africa"),
    country(776, "TON", "Tonga", "Oceania"),
    country(780, "TTO", "Trinidad and Tobago", "Americas"),
    country(788, "TUN", "Tunisia", "Africa"),
    country(792, "TUR", "Turkey", "Asia"),
    country(795, "TKM", "Turkmenistan", "Asia"),
    country(798, "TUV", "Tuvalu", "Oceania"),
    country(800, "UGA", "Uganda", "Africa"),
    country(804, "UKR", "Ukraine", "Europe"),
    country(784, "ARE", "United Arab Emirates", "Asia"),
    country(826, "GBR", "United Kingdom", "Europe"),
    country(840, "USA", "United States", "Americas"),
    country(858, "URY", "Uruguay", "Americas"),
    country(860, "UZB", "Uzbekistan", "Asia"),
    country(548, "VUT", "Vanuatu", "Oceania"),
    country(862, "VEN", "Venezuela", "Americas"),
    country(704, "VNM", "Viet Nam", "Asia"),
    country(887, "YEM", "Yemen", "Asia"),
    country(894, "ZMB", "Zambia", "Africa"),
    country(716, "ZWE", "Zimbabwe", "Africa"),
    country(533, "ABW", "Aruba", "Americas"),
    country(238, "FLK", "Falkland Islands", "Americas"),
    country(254, "GUF", "French Guiana", "Americas"),
    country(312, "GLP", "Guadeloupe", "Americas"),
    country(316, "GUM", "Guam", "Oceania"),
    country(474, "MTQ", "Martinique", "Americas"),
    country(540, "NCL", "New Caledonia", "Oceania"),
    country(630, "PRI", "Puerto Rico", "Americas"),
    country(638, "REU", "Réunion", "Africa"),
    country(652, "BLM", "Saint Barthélemy", "Americas"),
    country(663, "MAF", "Saint Martin", "Americas"),
    country(666, "SPM", "Saint Pierre and Miquelon", "Americas"),
    country(796, "TCA", "Turks and Caicos Islands", "Americas"),
    country(850, "VIR", "U.S. Virgin Islands", "Americas"),
    country(876, "WLF", "Wallis and Futuna", "Oceania"),
    country(214, "TWN", "Taiwan", "Asia"),
    aggregate(5100, "Africa"),
    aggregate(5200, "Asia"),
    aggregate(5300, "Europe"),
    aggregate(5400, "Americas"),
    aggregate(5500, "Oceania"),
];
