//! Fixed panel bodies. All of them are Telegram HTML.

pub const WELCOME: &str = "🌿 <b>Bienvenue chez CBD Shop !</b>

Découvrez notre sélection premium de :
• 🌿 Cartouches CBD 1g
• 💨 Disposables CBD 1g

Produits de haute qualité, testés en laboratoire et conformes à la législation française.

<b>Cliquez sur le bouton ci-dessous pour accéder à la boutique</b> 👇";

pub const INFO: &str = "ℹ️ <b>Informations CBD Shop</b>

<b>Qui sommes-nous ?</b>
Spécialistes du CBD depuis 2020, nous proposons des produits premium testés en laboratoire.

<b>Nos produits :</b>
🌿 Cartouches CBD 1g (35€)
• Compatible batteries 510
• CBD : 85-87%
• THC &lt; 0.2%

💨 Disposables CBD 1g (30€)
• Prêts à l’emploi
• ~400 bouffées
• Batterie intégrée

<b>Qualité garantie :</b>
✅ Lab testé
✅ Sans THC (&lt; 0.2%)
✅ Arômes naturels
✅ Fabriqué en France/Europe

<b>Certification :</b>
Tous nos produits sont conformes à la législation française et européenne.";

pub const SHIPPING: &str = "📦 <b>Informations Livraison</b>

<b>Modes de livraison :</b>

🚗 <b>Livraison Express (Paris &amp; région)</b>
• Délai : 2-4h
• Prix : 10€
• Disponible 7j/7

📮 <b>Colissimo Suivi</b>
• Délai : 24-48h
• Prix : Gratuit dès 50€ (sinon 5€)
• Toute la France

📍 <b>Retrait en point relais</b>
• Délai : 24-48h
• Prix : 3€
• Plus de 10 000 points relais

<b>Colis discret :</b>
Emballage neutre, sans mention du contenu.

<b>Suivi de commande :</b>
Vous recevez un numéro de suivi dès l’expédition.

<b>Retours :</b>
14 jours pour changer d’avis (produits non ouverts).";

/// `{contact}` and `{channel}` are substituted, already HTML-escaped.
pub const CONTACT_TEMPLATE: &str = "📞 <b>Nous Contacter</b>

<b>Service Client :</b>
Telegram : @{contact}
Réponse sous 2h en moyenne

<b>Horaires :</b>
Lundi - Vendredi : 9h - 20h
Samedi - Dimanche : 10h - 18h

<b>Suivez-nous :</b>
📢 Notre canal : {channel}
Offres exclusives, nouveautés et promotions !

<b>Questions fréquentes :</b>
• Livraison : /livraison
• Nos produits : /info
• Boutique : /shop

<b>Une question ? Une suggestion ?</b>
N’hésitez pas à nous écrire directement !";

pub const SHOP: &str = "🌿 Cliquez sur le bouton ci-dessous pour accéder à notre boutique :";

// Button labels
pub const OPEN_SHOP: &str = "🛍️ Accéder à la boutique";
pub const SEE_SHOP: &str = "🛍️ Voir la boutique";
pub const ORDER_NOW: &str = "🛍️ Commander maintenant";
pub const SHOP_OPEN: &str = "🛍️ Ouvrir la boutique";
pub const INFO_BUTTON: &str = "ℹ️ Informations";
pub const SHIPPING_BUTTON: &str = "📦 Livraison";
pub const CONTACT_BUTTON: &str = "📞 Contact";
pub const CHANNEL_BUTTON: &str = "📢 Notre Canal";
pub const JOIN_CHANNEL: &str = "📢 Rejoindre le canal";
pub const SEND_MESSAGE: &str = "💬 Envoyer un message";
pub const BACK_TO_MENU: &str = "« Retour au menu";
pub const SUPPORT_BUTTON: &str = "📞 Contacter le support";
pub const MENU_BUTTON: &str = "🛍️ Boutique";
